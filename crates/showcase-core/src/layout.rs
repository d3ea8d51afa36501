#![forbid(unsafe_code)]

//! Read-only view of the host UI tree.
//!
//! The tour never manages layout. It measures the host surface, element
//! bounds and scroll viewports through this trait, at the moment it needs
//! them, and keeps no copy.

use std::rc::Rc;

use crate::anchor::{ContainerId, ElementId};
use crate::geometry::Rect;

/// Layout and bounds queries answered by the host.
///
/// All rectangles are in host-surface coordinates.
pub trait LayoutQuery {
    /// Bounds of the surface the overlay is drawn over.
    fn host_bounds(&self) -> Rect;

    /// Current bounds of an element, or `None` when it is detached or has
    /// not been measured yet.
    fn bounds(&self, element: ElementId) -> Option<Rect>;

    /// Visible viewport of a scroll container, or `None` when the container
    /// no longer exists.
    fn viewport_visible_rect(&self, container: ContainerId) -> Option<Rect>;
}

impl<T: LayoutQuery + ?Sized> LayoutQuery for &T {
    fn host_bounds(&self) -> Rect {
        (**self).host_bounds()
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        (**self).bounds(element)
    }

    fn viewport_visible_rect(&self, container: ContainerId) -> Option<Rect> {
        (**self).viewport_visible_rect(container)
    }
}

impl<T: LayoutQuery + ?Sized> LayoutQuery for Rc<T> {
    fn host_bounds(&self) -> Rect {
        (**self).host_bounds()
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        (**self).bounds(element)
    }

    fn viewport_visible_rect(&self, container: ContainerId) -> Option<Rect> {
        (**self).viewport_visible_rect(container)
    }
}

/// A frozen layout: fixed host bounds, elements and viewports.
///
/// Handy for hosts that snapshot their tree once per frame, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    host: Rect,
    elements: Vec<(ElementId, Rect)>,
    viewports: Vec<(ContainerId, Rect)>,
}

impl StaticLayout {
    #[must_use]
    pub fn new(host: Rect) -> Self {
        Self {
            host,
            elements: Vec::new(),
            viewports: Vec::new(),
        }
    }

    /// Add (or replace) an element's bounds.
    #[must_use]
    pub fn element(mut self, id: ElementId, bounds: Rect) -> Self {
        self.elements.retain(|(existing, _)| *existing != id);
        self.elements.push((id, bounds));
        self
    }

    /// Add (or replace) a scroll container's visible viewport.
    #[must_use]
    pub fn viewport(mut self, id: ContainerId, visible: Rect) -> Self {
        self.viewports.retain(|(existing, _)| *existing != id);
        self.viewports.push((id, visible));
        self
    }
}

impl LayoutQuery for StaticLayout {
    fn host_bounds(&self) -> Rect {
        self.host
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.elements
            .iter()
            .find(|(id, _)| *id == element)
            .map(|(_, rect)| *rect)
    }

    fn viewport_visible_rect(&self, container: ContainerId) -> Option<Rect> {
        self.viewports
            .iter()
            .find(|(id, _)| *id == container)
            .map(|(_, rect)| *rect)
    }
}
