#![forbid(unsafe_code)]

//! Core: geometry, anchors, and the pure policies behind a guided tour.
//!
//! # Role in showcase
//! `showcase-core` holds everything that can be decided without state:
//! where a step points ([`PositionResolver`]), whether a scroll is needed
//! first ([`PositionResolver::scroll_target`]), and how large the spotlight
//! is ([`RadiusPolicy`]).
//!
//! # How it fits in the system
//! `showcase-step` owns the sequencing state machine and calls into this
//! crate every time a step is about to be revealed. The host UI tree is
//! reached only through [`LayoutQuery`].

pub mod anchor;
pub mod degradation;
pub mod geometry;
pub mod layout;
pub mod radius;
pub mod resolve;
pub mod step;
pub mod tint;

pub use anchor::{AnchorSpec, ContainerId, Corner, CornerInset, ElementId};
pub use degradation::Degradation;
pub use geometry::{Point, Rect, Size};
pub use layout::{LayoutQuery, StaticLayout};
pub use radius::{RadiusPolicy, effective_radius};
pub use resolve::{PositionResolver, ResolvedPoint, ScrollDelta, ScrollTarget};
pub use step::Step;
pub use tint::{Tint, TintParseError};
