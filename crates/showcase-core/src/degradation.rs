#![forbid(unsafe_code)]

//! Conditions a tour absorbs instead of surfacing.
//!
//! A guided tour is an affordance, not a data path: when its host goes away
//! or a target disappears it skips a step or ends, it never fails. Each
//! absorbed condition is still named so it can be logged and counted.

use std::fmt;

/// An absorbed, non-fatal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degradation {
    /// An input or scroll-completion callback arrived after the tour moved on.
    StaleCallback,
    /// A referenced element could not be measured; the fallback point was used.
    MissingAnchorTarget,
    /// The host surface is being torn down; the display attempt was dropped.
    InactiveHost,
}

impl Degradation {
    /// Stable label for log fields and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StaleCallback => "stale_callback",
            Self::MissingAnchorTarget => "missing_anchor_target",
            Self::InactiveHost => "inactive_host",
        }
    }

    /// What the tour does in response.
    pub const fn resolution(self) -> &'static str {
        match self {
            Self::StaleCallback => "ignored",
            Self::MissingAnchorTarget => "fallback_point",
            Self::InactiveHost => "display_skipped",
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
