#![forbid(unsafe_code)]

//! Fluent construction of a [`TourSequencer`].

use showcase_core::{ContainerId, CornerInset, LayoutQuery, Step, Tint};
use tracing::debug;

use crate::config::TourConfig;
use crate::error::TourError;
use crate::scroll::{ScrollBehavior, ScrollCoordinator, ScrollDriver};
use crate::sequencer::{Collaborators, TargetClickListener, TourSequencer};
use crate::surface::{AlwaysActive, HostLiveness, OverlayHandle, RenderSurface};

/// Collects collaborators, configuration and steps, then builds an
/// immutable-config [`TourSequencer`].
///
/// ```rust,ignore
/// let tour = TourBuilder::new(surface, layout)
///     .liveness(move || host.is_attached())
///     .scroll_container(LIST, driver)
///     .display_progress(true)
///     .add_step(Step::new(Corner::TopRightInset, "Search", "Find anything here"))
///     .add_step(Step::element(SAVE, "Save", "Keeps your draft"))
///     .on_target_clicked(|tour, _overlay| tour.dismiss())
///     .build()?;
/// tour.start();
/// ```
#[must_use]
pub struct TourBuilder {
    surface: Box<dyn RenderSurface>,
    layout: Box<dyn LayoutQuery>,
    liveness: Box<dyn HostLiveness>,
    driver: Option<Box<dyn ScrollDriver>>,
    config: TourConfig,
    steps: Vec<Step>,
    listener: Option<TargetClickListener>,
}

impl TourBuilder {
    pub fn new(
        surface: impl RenderSurface + 'static,
        layout: impl LayoutQuery + 'static,
    ) -> Self {
        Self {
            surface: Box::new(surface),
            layout: Box::new(layout),
            liveness: Box::new(AlwaysActive),
            driver: None,
            config: TourConfig::default(),
            steps: Vec::new(),
            listener: None,
        }
    }

    /// Query consulted before every display. Default: always active.
    pub fn liveness(mut self, liveness: impl HostLiveness + 'static) -> Self {
        self.liveness = Box::new(liveness);
        self
    }

    /// Scroll `container` with `driver` to reveal off-screen targets.
    pub fn scroll_container(
        mut self,
        container: ContainerId,
        driver: impl ScrollDriver + 'static,
    ) -> Self {
        self.config.scroll_container = Some(container);
        self.driver = Some(Box::new(driver));
        self
    }

    /// Driver for a container named by a loaded [`TourConfig`].
    pub fn scroll_driver(mut self, driver: impl ScrollDriver + 'static) -> Self {
        self.driver = Some(Box::new(driver));
        self
    }

    pub fn custom_layout(mut self, layout: impl Into<String>) -> Self {
        self.config.custom_layout = Some(layout.into());
        self
    }

    pub fn display_progress(mut self, display: bool) -> Self {
        self.config.display_progress = display;
        self
    }

    pub fn background_tint(mut self, tint: Tint) -> Self {
        self.config.background_tint = tint;
        self
    }

    pub fn radius_proportional_to_target(mut self, proportional: bool) -> Self {
        self.config.radius_proportional_to_target = proportional;
        self
    }

    pub fn default_radius(mut self, radius: f32) -> Self {
        self.config.default_radius = radius;
        self
    }

    pub fn corner_inset(mut self, inset: CornerInset) -> Self {
        self.config.corner_inset = inset;
        self
    }

    pub fn scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.config.scroll_behavior = behavior;
        self
    }

    /// Replace the whole configuration, e.g. one loaded from a file.
    pub fn config(mut self, config: TourConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Tapping the highlighted target ends the tour and calls `listener`
    /// instead of advancing.
    pub fn on_target_clicked(
        mut self,
        listener: impl FnMut(&TourSequencer, Box<dyn OverlayHandle>) + 'static,
    ) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<TourSequencer, TourError> {
        let errors = self.config.validate();
        if !errors.is_empty() {
            return Err(TourError::InvalidConfig(errors));
        }
        if self.steps.is_empty() {
            return Err(TourError::NoSteps);
        }

        let scroller = match (self.config.scroll_container, self.driver) {
            (Some(_), Some(driver)) => {
                Some(ScrollCoordinator::new(driver, self.config.scroll_behavior))
            }
            (Some(container), None) => {
                debug!(
                    container = container.0,
                    "scroll container without driver, targets will not be scrolled"
                );
                None
            }
            (None, _) => None,
        };
        debug!(config = %self.config.to_jsonl(), steps = self.steps.len(), "tour built");

        let io = Collaborators {
            surface: self.surface,
            layout: self.layout,
            liveness: self.liveness,
            scroller,
        };
        Ok(TourSequencer::from_parts(
            self.config,
            self.steps,
            io,
            self.listener,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{OverlayId, OverlayRequest, TouchCallback};
    use showcase_core::{AnchorSpec, Rect, StaticLayout};

    struct NullOverlay;

    impl OverlayHandle for NullOverlay {
        fn id(&self) -> OverlayId {
            OverlayId(0)
        }
        fn hide(&mut self) {}
        fn hide_card(&mut self) {}
        fn set_progress(&mut self, _index: usize, _total: usize) {}
    }

    struct NullSurface;

    impl RenderSurface for NullSurface {
        fn show_overlay(
            &mut self,
            _request: OverlayRequest,
            _on_touch: TouchCallback,
        ) -> Box<dyn OverlayHandle> {
            Box::new(NullOverlay)
        }
    }

    fn builder() -> TourBuilder {
        TourBuilder::new(NullSurface, StaticLayout::new(Rect::from_size(100, 100)))
    }

    #[test]
    fn empty_tour_is_rejected() {
        assert!(matches!(builder().build(), Err(TourError::NoSteps)));
    }

    #[test]
    fn invalid_config_is_rejected_before_steps() {
        let err = builder().default_radius(0.0).build().unwrap_err();
        match err {
            TourError::InvalidConfig(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn setters_land_in_config() {
        let tour = builder()
            .custom_layout("card_compact")
            .display_progress(true)
            .background_tint(Tint::rgba(0x10, 0x20, 0x30, 0x80))
            .radius_proportional_to_target(true)
            .default_radius(48.0)
            .corner_inset(CornerInset::new(8.0, 12.0))
            .scroll_behavior(ScrollBehavior::Immediate)
            .add_step(Step::new(AnchorSpec::Center, "a", "b"))
            .steps([Step::new(AnchorSpec::Center, "c", "d")])
            .build()
            .expect("valid tour");

        let config = tour.config();
        assert_eq!(config.custom_layout.as_deref(), Some("card_compact"));
        assert!(config.display_progress);
        assert_eq!(config.background_tint.to_string(), "#10203080");
        assert!(config.radius_proportional_to_target);
        assert_eq!(config.default_radius, 48.0);
        assert_eq!(config.corner_inset, CornerInset::new(8.0, 12.0));
        assert_eq!(config.scroll_behavior, ScrollBehavior::Immediate);
        assert_eq!(tour.step_count(), 2);
        assert!(!tour.is_running());
    }

    #[test]
    fn config_replaces_earlier_setters() {
        let tour = builder()
            .display_progress(true)
            .config(TourConfig::default())
            .add_step(Step::new(AnchorSpec::Center, "a", "b"))
            .build()
            .expect("valid tour");
        assert!(!tour.config().display_progress);
    }
}
