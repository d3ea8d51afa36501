#![forbid(unsafe_code)]

//! Step sequencing for guided tours.
//!
//! # Role in showcase
//! `showcase-step` owns the tour state machine. It decides which step is
//! next, whether a container has to scroll first, and what to do with a tap.
//! Pixels, layout and scrolling belong to the host and are reached through
//! the traits in [`surface`] and [`scroll`], plus
//! [`LayoutQuery`](showcase_core::LayoutQuery).
//!
//! # Key components
//! - [`TourBuilder`]: collaborators, configuration and steps in; a
//!   [`TourSequencer`] out.
//! - [`TourSequencer`]: start, advance on tap, dismiss.
//! - [`ScrollCoordinator`]: scroll-then-reveal with a completion that fires
//!   exactly once.
//! - [`TourConfig`]: construction-time knobs, loadable from TOML/JSON with
//!   the `config` feature.
//!
//! # Logging
//! Transitions run inside `showcase.tour.start`, `showcase.tour.display` and
//! `showcase.tour.dismiss` spans. Every absorbed condition emits a `debug!`
//! event carrying a `degradation` field. No subscriber is installed here.

pub mod builder;
pub mod config;
pub mod error;
pub mod scroll;
pub mod sequencer;
pub mod surface;

pub use builder::TourBuilder;
pub use config::{ConfigError, DEFAULT_RADIUS, TourConfig};
pub use error::TourError;
pub use scroll::{ScrollBehavior, ScrollCompletion, ScrollCoordinator, ScrollDriver, ScrollOutcome};
pub use sequencer::{TargetClickListener, Ticket, TourPhase, TourSequencer, TourStatus};
pub use surface::{
    AlwaysActive, HostLiveness, OverlayHandle, OverlayId, OverlayRequest, RenderSurface,
    TouchCallback,
};
