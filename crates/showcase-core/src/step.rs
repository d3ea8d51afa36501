#![forbid(unsafe_code)]

//! One unit of a guided tour.

use crate::anchor::{AnchorSpec, ElementId};

/// An anchor plus the text shown next to it.
///
/// Steps are immutable once built; their order in the tour is their
/// display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    anchor: AnchorSpec,
    title: String,
    message: String,
}

impl Step {
    /// A step pointing at an arbitrary anchor.
    pub fn new(
        anchor: impl Into<AnchorSpec>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            anchor: anchor.into(),
            title: title.into(),
            message: message.into(),
        }
    }

    /// A step pointing at the centre of an element.
    pub fn element(id: ElementId, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AnchorSpec::ElementBounds(id), title, message)
    }

    /// Points at `element` when present, otherwise at `fallback`.
    ///
    /// Useful when the element is optional in the current screen layout.
    pub fn element_or(
        element: Option<ElementId>,
        fallback: impl Into<AnchorSpec>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let anchor = match element {
            Some(id) => AnchorSpec::ElementBounds(id),
            None => fallback.into(),
        };
        Self::new(anchor, title, message)
    }

    #[inline]
    pub fn anchor(&self) -> &AnchorSpec {
        &self.anchor
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}
