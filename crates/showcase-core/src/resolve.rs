#![forbid(unsafe_code)]

//! Anchor resolution.
//!
//! # Invariants
//!
//! 1. Resolution reads the layout and nothing else; two calls against an
//!    unchanged layout return the same point.
//! 2. Element bounds are measured on every call, never cached.
//! 3. An element that cannot be measured resolves to a fallback point
//!    (centre of the scroll viewport, else centre of the host) and is
//!    flagged, never an error.
//! 4. Only element anchors can produce a [`ScrollTarget`].

use crate::anchor::{AnchorSpec, ContainerId, Corner, CornerInset, ElementId};
use crate::geometry::{Point, Rect, Size};
use crate::layout::LayoutQuery;

/// Result of resolving an anchor against the current layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    /// Where the spotlight is centred.
    pub point: Point,
    /// Measured size of the referenced element, for element anchors that
    /// could be measured.
    pub target: Option<Size>,
    /// `true` when an element anchor could not be measured and `point` is
    /// the fallback.
    pub fallback: bool,
}

impl ResolvedPoint {
    #[inline]
    const fn at(point: Point) -> Self {
        Self {
            point,
            target: None,
            fallback: false,
        }
    }
}

/// Signed scroll distance in pixels. Positive `dy` scrolls content up
/// (reveals what is below).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollDelta {
    pub dx: i32,
    pub dy: i32,
}

impl ScrollDelta {
    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// A scroll that would bring an element into its container's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    pub container: ContainerId,
    pub element: ElementId,
    pub delta: ScrollDelta,
}

/// Resolves anchors to points and scroll targets.
///
/// Holds only construction-time configuration; every method is a pure
/// function of its arguments and the layout it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionResolver {
    inset: CornerInset,
    container: Option<ContainerId>,
}

impl PositionResolver {
    #[must_use]
    pub const fn new(inset: CornerInset, container: Option<ContainerId>) -> Self {
        Self { inset, container }
    }

    #[inline]
    pub const fn container(&self) -> Option<ContainerId> {
        self.container
    }

    /// Resolve an anchor to a point on the host surface.
    pub fn resolve(&self, anchor: &AnchorSpec, layout: &dyn LayoutQuery) -> ResolvedPoint {
        match *anchor {
            AnchorSpec::FixedCorner(corner) => {
                ResolvedPoint::at(corner_point(corner, layout.host_bounds(), self.inset))
            }
            AnchorSpec::Center => ResolvedPoint::at(layout.host_bounds().center()),
            AnchorSpec::ExplicitPoint(point) => ResolvedPoint::at(point),
            AnchorSpec::ElementBounds(id) => match measure(layout, id) {
                Some(bounds) => ResolvedPoint {
                    point: bounds.center(),
                    target: Some(bounds.size()),
                    fallback: false,
                },
                None => ResolvedPoint {
                    point: self.fallback_point(layout),
                    target: None,
                    fallback: true,
                },
            },
        }
    }

    /// The scroll needed before `anchor` can be shown, if any.
    ///
    /// `None` for non-element anchors, when no container is configured, when
    /// the element or viewport cannot be measured, and when the element is
    /// already fully visible.
    pub fn scroll_target(
        &self,
        anchor: &AnchorSpec,
        layout: &dyn LayoutQuery,
    ) -> Option<ScrollTarget> {
        let element = anchor.element()?;
        let container = self.container?;
        let bounds = measure(layout, element)?;
        let viewport = layout
            .viewport_visible_rect(container)
            .filter(|v| !v.is_empty())?;
        if viewport.contains_rect(&bounds) {
            return None;
        }
        let delta = reveal_delta(bounds, viewport);
        if delta.is_zero() {
            return None;
        }
        Some(ScrollTarget {
            container,
            element,
            delta,
        })
    }

    fn fallback_point(&self, layout: &dyn LayoutQuery) -> Point {
        self.container
            .and_then(|c| layout.viewport_visible_rect(c))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| layout.host_bounds())
            .center()
    }
}

fn measure(layout: &dyn LayoutQuery, id: ElementId) -> Option<Rect> {
    layout.bounds(id).filter(|b| !b.is_empty())
}

fn corner_point(corner: Corner, host: Rect, inset: CornerInset) -> Point {
    let (left, top) = (host.left() as f32, host.top() as f32);
    let (right, bottom) = (host.right() as f32, host.bottom() as f32);
    match corner {
        Corner::TopLeft => Point::new(left, top),
        Corner::TopRight => Point::new(right, top),
        Corner::BottomLeft => Point::new(left, bottom),
        Corner::BottomRight => Point::new(right, bottom),
        Corner::TopLeftInset => Point::new(left + inset.dx, top + inset.dy),
        Corner::TopRightInset => Point::new(right - inset.dx, top + inset.dy),
    }
}

/// Scroll that makes `bounds` visible inside `viewport`, per axis.
fn reveal_delta(bounds: Rect, viewport: Rect) -> ScrollDelta {
    ScrollDelta::new(
        axis_delta(bounds.x, bounds.width, viewport.x, viewport.width),
        axis_delta(bounds.y, bounds.height, viewport.y, viewport.height),
    )
}

/// Elements larger than the viewport get their leading edge aligned;
/// otherwise the minimal move that fits the whole extent. Saturates at the
/// `i32` range.
fn axis_delta(start: i32, len: i32, view_start: i32, view_len: i32) -> i32 {
    let end = start.saturating_add(len);
    let view_end = view_start.saturating_add(view_len);
    if len >= view_len || start < view_start {
        start.saturating_sub(view_start)
    } else if end > view_end {
        end.saturating_sub(view_end)
    } else {
        0
    }
}
