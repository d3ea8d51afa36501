#![forbid(unsafe_code)]

//! Errors surfaced to the code that builds and edits a tour.
//!
//! Everything that happens once a tour is running is absorbed instead; see
//! [`Degradation`](showcase_core::Degradation).

use crate::config::ConfigError;

/// Errors from building a tour or editing its steps.
#[derive(Debug)]
pub enum TourError {
    /// `build()` was called without any step.
    NoSteps,
    /// Steps can only change while the tour is idle.
    StepsLocked,
    /// The configuration failed validation.
    InvalidConfig(Vec<String>),
    /// The configuration could not be loaded.
    Config(ConfigError),
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSteps => write!(f, "tour has no steps"),
            Self::StepsLocked => write!(f, "steps cannot change while the tour is running"),
            Self::InvalidConfig(errors) => {
                write!(f, "invalid tour config: {}", errors.join("; "))
            }
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for TourError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(errors) => Self::InvalidConfig(errors),
            other => Self::Config(other),
        }
    }
}
