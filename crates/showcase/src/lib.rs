#![forbid(unsafe_code)]

//! Showcase public facade crate.
//!
//! Guided tours that spotlight one element at a time, scrolling it into view
//! first when needed. This crate re-exports the stable surface of
//! `showcase-core` and `showcase-step` and offers a prelude for day-to-day
//! usage.
//!
//! ```rust,ignore
//! use showcase::prelude::*;
//!
//! let tour = TourBuilder::new(surface, layout)
//!     .scroll_container(LIST, driver)
//!     .display_progress(true)
//!     .add_step(Step::new(Corner::TopRightInset, "Search", "Find anything"))
//!     .add_step(Step::element(SAVE, "Save", "Keeps your draft"))
//!     .build()?;
//! tour.start();
//! ```

// --- Core re-exports -------------------------------------------------------

pub use showcase_core::{
    AnchorSpec, ContainerId, Corner, CornerInset, Degradation, ElementId, LayoutQuery, Point,
    PositionResolver, RadiusPolicy, Rect, ResolvedPoint, ScrollDelta, ScrollTarget, Size,
    StaticLayout, Step, Tint, TintParseError, effective_radius,
};

// --- Sequencer re-exports --------------------------------------------------

pub use showcase_step::{
    AlwaysActive, ConfigError, DEFAULT_RADIUS, HostLiveness, OverlayHandle, OverlayId,
    OverlayRequest, RenderSurface, ScrollBehavior, ScrollCompletion, ScrollCoordinator,
    ScrollDriver, ScrollOutcome, TargetClickListener, TouchCallback, TourBuilder, TourConfig,
    TourError, TourPhase, TourSequencer, TourStatus,
};

/// Standard result type for showcase APIs.
pub type Result<T> = std::result::Result<T, TourError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnchorSpec, ContainerId, Corner, ElementId, HostLiveness, LayoutQuery, OverlayHandle,
        RenderSurface, Result, ScrollBehavior, ScrollDriver, Step, Tint, TourBuilder, TourConfig,
        TourError, TourPhase, TourSequencer,
    };

    pub use crate::{core, step};
}

pub use showcase_core as core;
pub use showcase_step as step;
