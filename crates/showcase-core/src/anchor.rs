#![forbid(unsafe_code)]

//! Anchors: where a tour step points.
//!
//! [`AnchorSpec`] is a closed set. Every variant is resolved by a single
//! function in [`crate::resolve`], so resolution stays exhaustive and free
//! of side effects.

use std::fmt;

use crate::geometry::Point;

/// Opaque reference to an element of the host UI tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub u32);

/// Opaque reference to a scroll container of the host UI tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ContainerId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Fixed positions on the host surface.
///
/// The `*Inset` variants sit inside the surface by the configured
/// [`CornerInset`], over the action slots of a fixed toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopLeftInset,
    TopRightInset,
}

impl Corner {
    pub const ALL: [Corner; 6] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopLeftInset,
        Corner::TopRightInset,
    ];

    #[inline]
    pub const fn is_inset(self) -> bool {
        matches!(self, Corner::TopLeftInset | Corner::TopRightInset)
    }
}

/// Offset applied to the inset corners, already resolved to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CornerInset {
    /// Horizontal distance from the left/right edge.
    pub dx: f32,
    /// Vertical distance from the top edge.
    pub dy: f32,
}

impl CornerInset {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl Default for CornerInset {
    /// Centre of the first action slot of a 56px toolbar.
    fn default() -> Self {
        Self { dx: 28.0, dy: 28.0 }
    }
}

/// The location a step points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorSpec {
    /// A corner of the host surface.
    FixedCorner(Corner),
    /// Geometric centre of the host surface.
    Center,
    /// A literal point in host coordinates.
    ExplicitPoint(Point),
    /// Centre of an element's bounds, measured at resolution time.
    ElementBounds(ElementId),
}

impl AnchorSpec {
    /// Shorthand for [`AnchorSpec::ExplicitPoint`].
    #[inline]
    pub const fn point(x: f32, y: f32) -> Self {
        Self::ExplicitPoint(Point::new(x, y))
    }

    /// The referenced element, if this anchor tracks one.
    #[inline]
    pub const fn element(&self) -> Option<ElementId> {
        match self {
            Self::ElementBounds(id) => Some(*id),
            _ => None,
        }
    }

    /// Stable label for log fields.
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::FixedCorner(_) => "corner",
            Self::Center => "center",
            Self::ExplicitPoint(_) => "point",
            Self::ElementBounds(_) => "element",
        }
    }
}

impl From<Corner> for AnchorSpec {
    fn from(corner: Corner) -> Self {
        Self::FixedCorner(corner)
    }
}

impl From<ElementId> for AnchorSpec {
    fn from(id: ElementId) -> Self {
        Self::ElementBounds(id)
    }
}

impl From<Point> for AnchorSpec {
    fn from(point: Point) -> Self {
        Self::ExplicitPoint(point)
    }
}
