#![forbid(unsafe_code)]

//! Tour configuration as data.
//!
//! [`TourConfig`] holds every construction-time knob of a tour. The builder
//! fills it field by field; hosts that keep their tour styling in a file can
//! load it instead.
//!
//! # Loading
//!
//! ```toml
//! # tour.toml
//! background_tint = "#1A237ECC"
//! radius_proportional_to_target = true
//! display_progress = true
//! scroll_container = 3
//! scroll_behavior = "immediate"
//!
//! [corner_inset]
//! dx = 32.0
//! dy = 24.0
//! ```
//!
//! ```rust,ignore
//! let config = TourConfig::from_toml_file("tour.toml")?;
//! let config = TourConfig::from_json_str(json)?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `TourConfig::default()` is what a bare [`TourBuilder`](crate::TourBuilder)
//! produces: 20% black backdrop, fixed 100px radius, no progress, no scroll
//! container, smooth scrolling.

use std::path::{Path, PathBuf};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use showcase_core::{ContainerId, CornerInset, PositionResolver, RadiusPolicy, Tint};

use crate::scroll::ScrollBehavior;

/// Radius used when the spotlight does not follow the target's size.
pub const DEFAULT_RADIUS: f32 = 100.0;

/// Construction-time configuration of a tour. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TourConfig {
    /// Card layout the surface should use instead of its default.
    pub custom_layout: Option<String>,

    /// Backdrop tint. Default: `#00000033`.
    pub background_tint: Tint,

    /// Size the spotlight from the target element's width.
    pub radius_proportional_to_target: bool,

    /// Show "n of m" on every card of a multi-step tour.
    pub display_progress: bool,

    /// Spotlight radius in pixels when not proportional. Default: 100.
    pub default_radius: f32,

    /// Offset of the inset corners from the host edges.
    pub corner_inset: CornerInset,

    /// Container scrolled to reveal off-screen targets.
    pub scroll_container: Option<ContainerId>,

    /// Default: smooth.
    pub scroll_behavior: ScrollBehavior,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            custom_layout: None,
            background_tint: Tint::BLACK_20,
            radius_proportional_to_target: false,
            display_progress: false,
            default_radius: DEFAULT_RADIUS,
            corner_inset: CornerInset::default(),
            scroll_container: None,
            scroll_behavior: ScrollBehavior::Smooth,
        }
    }
}

impl TourConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Self::parse_toml(s, None)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Self::parse_toml(&read_source(path)?, Some(path))
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Self::parse_json(s, None)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Self::parse_json(&read_source(path)?, Some(path))
    }

    #[cfg(feature = "config")]
    fn parse_toml(s: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|source| ConfigError::Toml {
            path: path.map(Path::to_path_buf),
            source,
        })
    }

    #[cfg(feature = "config")]
    fn parse_json(s: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|source| ConfigError::Json {
            path: path.map(Path::to_path_buf),
            source,
        })
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.default_radius.is_finite() || self.default_radius <= 0.0 {
            errors.push(format!(
                "default_radius must be finite and > 0, got {}",
                self.default_radius
            ));
        }
        if !self.corner_inset.dx.is_finite() || self.corner_inset.dx < 0.0 {
            errors.push(format!(
                "corner_inset.dx must be finite and >= 0, got {}",
                self.corner_inset.dx
            ));
        }
        if !self.corner_inset.dy.is_finite() || self.corner_inset.dy < 0.0 {
            errors.push(format!(
                "corner_inset.dy must be finite and >= 0, got {}",
                self.corner_inset.dy
            ));
        }
        if self
            .custom_layout
            .as_deref()
            .is_some_and(|layout| layout.trim().is_empty())
        {
            errors.push("custom_layout must not be blank when set".to_owned());
        }

        errors
    }

    /// `self` if it validates, otherwise every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Anchor resolver for this configuration.
    #[must_use]
    pub fn resolver(&self) -> PositionResolver {
        PositionResolver::new(self.corner_inset, self.scroll_container)
    }

    /// Radius policy for this configuration.
    #[must_use]
    pub fn radius_policy(&self) -> RadiusPolicy {
        RadiusPolicy {
            proportional: self.radius_proportional_to_target,
            default_radius: self.default_radius,
        }
    }

    /// Format as a JSONL line for structured logging.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let container = self
            .scroll_container
            .map_or_else(|| "null".to_owned(), |c| c.0.to_string());
        let behavior = match self.scroll_behavior {
            ScrollBehavior::Smooth => "smooth",
            ScrollBehavior::Immediate => "immediate",
        };
        format!(
            r#"{{"schema":"showcase-tour-config-v1","background_tint":"{}","has_custom_layout":{},"radius_proportional":{},"display_progress":{},"default_radius":{},"corner_inset_dx":{},"corner_inset_dy":{},"scroll_container":{},"scroll_behavior":"{}"}}"#,
            self.background_tint,
            self.custom_layout.is_some(),
            self.radius_proportional_to_target,
            self.display_progress,
            self.default_radius,
            self.corner_inset.dx,
            self.corner_inset.dy,
            container,
            behavior,
        )
    }
}

#[cfg(feature = "config")]
fn read_source(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why a tour configuration could not be used.
///
/// Parse failures remember the file they came from; `path` is `None` for
/// configs parsed from a string.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[cfg(feature = "config")]
    Toml {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },
    #[cfg(feature = "config")]
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    /// Loaded fine, but [`TourConfig::validate`] found problems.
    Validation(Vec<String>),
}

impl ConfigError {
    /// File the config came from, when it came from one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => Some(path.as_path()),
            #[cfg(feature = "config")]
            Self::Toml { path, .. } | Self::Json { path, .. } => path.as_deref(),
            Self::Validation(_) => None,
        }
    }
}

/// `tour.toml` for file sources, `(inline)` for strings.
struct Origin<'a>(Option<&'a Path>);

impl std::fmt::Display for Origin<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(path) => write!(f, "{}", path.display()),
            None => f.write_str("(inline)"),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let origin = Origin(self.path());
        match self {
            Self::Io { source, .. } => write!(f, "cannot read tour config {origin}: {source}"),
            #[cfg(feature = "config")]
            Self::Toml { source, .. } => {
                write!(f, "tour config {origin} is not valid TOML: {source}")
            }
            #[cfg(feature = "config")]
            Self::Json { source, .. } => {
                write!(f, "tour config {origin} is not valid JSON: {source}")
            }
            Self::Validation(problems) => {
                write!(f, "tour config rejected: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            #[cfg(feature = "config")]
            Self::Toml { source, .. } => Some(source),
            #[cfg(feature = "config")]
            Self::Json { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::{AnchorSpec, Corner, LayoutQuery, Rect, StaticLayout};

    #[test]
    fn default_matches_builder_defaults() {
        let config = TourConfig::default();
        assert_eq!(config.background_tint.to_string(), "#00000033");
        assert_eq!(config.default_radius, 100.0);
        assert_eq!(config.corner_inset, CornerInset::new(28.0, 28.0));
        assert_eq!(config.scroll_behavior, ScrollBehavior::Smooth);
        assert!(config.custom_layout.is_none());
        assert!(config.scroll_container.is_none());
        assert!(!config.radius_proportional_to_target);
        assert!(!config.display_progress);
    }

    #[test]
    fn default_validates_clean() {
        assert!(TourConfig::default().validate().is_empty());
        assert!(TourConfig::default().validated().is_ok());
    }

    #[test]
    fn validate_catches_bad_radius() {
        for radius in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let config = TourConfig {
                default_radius: radius,
                ..TourConfig::default()
            };
            let errors = config.validate();
            assert_eq!(errors.len(), 1, "radius {radius}: {errors:?}");
            assert!(errors[0].contains("default_radius"));
        }
    }

    #[test]
    fn validate_catches_blank_layout() {
        let config = TourConfig {
            custom_layout: Some("  ".into()),
            ..TourConfig::default()
        };
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let config = TourConfig {
            default_radius: -1.0,
            corner_inset: CornerInset::new(-1.0, f32::NAN),
            ..TourConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "should catch every error: {errors:?}");
        match config.validated() {
            Err(ConfigError::Validation(list)) => assert_eq!(list, errors),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn resolver_uses_inset_and_container() {
        let config = TourConfig {
            corner_inset: CornerInset::new(10.0, 20.0),
            scroll_container: Some(ContainerId(4)),
            ..TourConfig::default()
        };
        let resolver = config.resolver();
        assert_eq!(resolver.container(), Some(ContainerId(4)));

        let layout = StaticLayout::new(Rect::from_size(200, 100));
        let resolved = resolver.resolve(&AnchorSpec::FixedCorner(Corner::TopRightInset), &layout);
        assert_eq!(resolved.point.x, 190.0);
        assert_eq!(resolved.point.y, 20.0);
        assert_eq!(layout.host_bounds().width, 200);
    }

    #[test]
    fn radius_policy_mirrors_flags() {
        let config = TourConfig {
            radius_proportional_to_target: true,
            default_radius: 64.0,
            ..TourConfig::default()
        };
        assert_eq!(config.radius_policy(), RadiusPolicy::proportional(64.0));
    }

    #[test]
    fn to_jsonl_produces_single_line_object() {
        let config = TourConfig {
            scroll_container: Some(ContainerId(7)),
            scroll_behavior: ScrollBehavior::Immediate,
            ..TourConfig::default()
        };
        let jsonl = config.to_jsonl();
        assert!(jsonl.starts_with('{'));
        assert!(jsonl.ends_with('}'));
        assert!(!jsonl.contains('\n'));
        assert!(jsonl.contains("showcase-tour-config-v1"));
        assert!(jsonl.contains(r##""background_tint":"#00000033""##));
        assert!(jsonl.contains(r#""scroll_container":7"#));
        assert!(jsonl.contains(r#""scroll_behavior":"immediate""#));
        assert!(jsonl.contains(r#""has_custom_layout":false"#));

        let named = TourConfig {
            custom_layout: Some("card_compact".into()),
            ..TourConfig::default()
        };
        assert!(named.to_jsonl().contains(r#""has_custom_layout":true"#));
    }

    #[test]
    fn error_display_joins_validation_messages() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "tour config rejected: a; b");
        assert!(err.path().is_none());
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn io_error_names_the_file() {
        let err = ConfigError::Io {
            path: PathBuf::from("styles/tour.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.path(), Some(Path::new("styles/tour.toml")));
        assert_eq!(err.to_string(), "cannot read tour config styles/tour.toml: gone");
        assert!(std::error::Error::source(&err).is_some());
    }
}
