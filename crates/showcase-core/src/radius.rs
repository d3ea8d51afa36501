#![forbid(unsafe_code)]

//! Spotlight radius selection.

use crate::anchor::AnchorSpec;
use crate::resolve::ResolvedPoint;
use crate::step::Step;

/// Effective radius for a step.
///
/// `default_radius` unless `proportional` is set and the step tracks an
/// element that could be measured; then the element's width. Width (not an
/// enclosing circle) makes the circle cover a typical button-shaped target.
pub fn effective_radius(
    step: &Step,
    resolved: &ResolvedPoint,
    proportional: bool,
    default_radius: f32,
) -> f32 {
    if !proportional {
        return default_radius;
    }
    match (step.anchor(), resolved.target) {
        (AnchorSpec::ElementBounds(_), Some(size)) => size.width as f32,
        _ => default_radius,
    }
}

/// Configured radius policy, applied per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusPolicy {
    pub proportional: bool,
    pub default_radius: f32,
}

impl RadiusPolicy {
    pub const fn fixed(default_radius: f32) -> Self {
        Self {
            proportional: false,
            default_radius,
        }
    }

    pub const fn proportional(default_radius: f32) -> Self {
        Self {
            proportional: true,
            default_radius,
        }
    }

    #[inline]
    pub fn radius_for(&self, step: &Step, resolved: &ResolvedPoint) -> f32 {
        effective_radius(step, resolved, self.proportional, self.default_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Corner, ElementId};
    use crate::geometry::{Point, Size};

    fn resolved(target: Option<Size>) -> ResolvedPoint {
        ResolvedPoint {
            point: Point::new(10.0, 10.0),
            target,
            fallback: target.is_none(),
        }
    }

    #[test]
    fn fixed_policy_ignores_element_size() {
        let step = Step::element(ElementId(1), "t", "m");
        let policy = RadiusPolicy::fixed(72.0);
        assert_eq!(policy.radius_for(&step, &resolved(Some(Size::new(300, 40)))), 72.0);
    }

    #[test]
    fn proportional_uses_width_not_height() {
        let step = Step::element(ElementId(1), "t", "m");
        let policy = RadiusPolicy::proportional(72.0);
        assert_eq!(policy.radius_for(&step, &resolved(Some(Size::new(120, 400)))), 120.0);
    }

    #[test]
    fn proportional_non_element_uses_default() {
        let policy = RadiusPolicy::proportional(72.0);
        for anchor in [
            crate::anchor::AnchorSpec::Center,
            Corner::TopRight.into(),
            crate::anchor::AnchorSpec::point(1.0, 1.0),
        ] {
            let step = Step::new(anchor, "t", "m");
            assert_eq!(policy.radius_for(&step, &resolved(None)), 72.0);
        }
    }

    #[test]
    fn proportional_unmeasured_element_uses_default() {
        let step = Step::element(ElementId(9), "t", "m");
        assert_eq!(effective_radius(&step, &resolved(None), true, 50.0), 50.0);
    }
}
