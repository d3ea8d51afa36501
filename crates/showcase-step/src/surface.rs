#![forbid(unsafe_code)]

//! Rendering surface and host liveness: the collaborators the sequencer
//! drives but does not implement.
//!
//! The surface draws the dimmed backdrop, the circular cutout and the card.
//! The sequencer only asks it to show an overlay and later to hide it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use showcase_core::{Point, Tint};

/// Identifier a surface assigns to each overlay it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Everything a surface needs to draw one step.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRequest {
    /// Spotlight centre in host coordinates.
    pub point: Point,
    /// Spotlight radius in pixels.
    pub radius: f32,
    /// Custom card layout, or `None` for the surface default.
    pub layout: Option<String>,
    pub title: String,
    pub message: String,
    /// Backdrop tint.
    pub tint: Tint,
}

/// Input callback handed to the surface with each overlay.
///
/// Called with `true` when the tap landed inside the highlighted circle and
/// `false` anywhere else. It may be called any number of times, at any
/// later point, including after the overlay was hidden.
pub type TouchCallback = Box<dyn FnMut(bool)>;

/// A visible overlay.
pub trait OverlayHandle {
    fn id(&self) -> OverlayId;

    /// Remove the overlay entirely.
    fn hide(&mut self);

    /// Hide the card only; the backdrop stays to avoid flicker while the
    /// next target scrolls into view.
    fn hide_card(&mut self);

    /// Show "step `index + 1` of `total`".
    fn set_progress(&mut self, index: usize, total: usize);
}

impl fmt::Debug for dyn OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OverlayHandle").field(&self.id()).finish()
    }
}

/// Draws overlays on the host.
pub trait RenderSurface {
    /// Show a new overlay and wire `on_touch` to its input.
    fn show_overlay(
        &mut self,
        request: OverlayRequest,
        on_touch: TouchCallback,
    ) -> Box<dyn OverlayHandle>;
}

/// Whether the host surface is still alive.
pub trait HostLiveness {
    fn is_host_active(&self) -> bool;
}

impl<F: Fn() -> bool> HostLiveness for F {
    fn is_host_active(&self) -> bool {
        self()
    }
}

impl HostLiveness for Rc<Cell<bool>> {
    fn is_host_active(&self) -> bool {
        self.get()
    }
}

/// Liveness for hosts that outlive every tour they run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysActive;

impl HostLiveness for AlwaysActive {
    fn is_host_active(&self) -> bool {
        true
    }
}
