#![forbid(unsafe_code)]

//! Scroll-then-reveal: the coordinator and its completion contract.
//!
//! # Invariants
//!
//! 1. Every request's completion fires exactly once.
//! 2. A zero-delta request completes synchronously without touching the
//!    driver.
//! 3. A completion the driver drops (container destroyed, scroll
//!    cancelled) still fires, with [`ScrollOutcome::Abandoned`].
//!
//! The coordinator does not cancel scrolls. Consumers bind a ticket into
//! the completion and ignore it on arrival if it went stale.

use std::fmt;

use showcase_core::{ContainerId, ScrollDelta, ScrollTarget};

/// How the driver should move the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum ScrollBehavior {
    /// Animated scroll; completes when it settles.
    #[default]
    Smooth,
    /// Jump straight to the destination.
    Immediate,
}

/// How a scroll request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The container reached its destination.
    Settled,
    /// The driver dropped the request without finishing it.
    Abandoned,
}

/// One-shot notification that a scroll finished.
///
/// Consumed by [`complete`](Self::complete). Dropping it without completing
/// fires the callback with [`ScrollOutcome::Abandoned`], so a pending
/// continuation is never lost.
pub struct ScrollCompletion {
    callback: Option<Box<dyn FnOnce(ScrollOutcome)>>,
}

impl ScrollCompletion {
    pub fn new(callback: impl FnOnce(ScrollOutcome) + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Report that the scroll settled.
    pub fn complete(mut self) {
        self.fire(ScrollOutcome::Settled);
    }

    /// Report that the scroll will never settle.
    pub fn abandon(mut self) {
        self.fire(ScrollOutcome::Abandoned);
    }

    fn fire(&mut self, outcome: ScrollOutcome) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

impl Drop for ScrollCompletion {
    fn drop(&mut self) {
        self.fire(ScrollOutcome::Abandoned);
    }
}

impl fmt::Debug for ScrollCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollCompletion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// Moves a scroll container. Implemented by the host.
pub trait ScrollDriver {
    /// Scroll `container` by `delta` and call `completion` once it settles.
    ///
    /// The completion may be called from inside this method or any time
    /// later. Dropping it counts as abandoning the scroll.
    fn scroll_by(
        &mut self,
        container: ContainerId,
        delta: ScrollDelta,
        behavior: ScrollBehavior,
        completion: ScrollCompletion,
    );
}

/// Issues scroll requests with a fixed behavior and the completion contract
/// described in the module docs.
pub struct ScrollCoordinator {
    driver: Box<dyn ScrollDriver>,
    behavior: ScrollBehavior,
    requests: u64,
}

impl ScrollCoordinator {
    pub fn new(driver: Box<dyn ScrollDriver>, behavior: ScrollBehavior) -> Self {
        Self {
            driver,
            behavior,
            requests: 0,
        }
    }

    #[inline]
    pub fn behavior(&self) -> ScrollBehavior {
        self.behavior
    }

    /// Number of requests forwarded to the driver.
    #[inline]
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Scroll to `target` and call `on_complete` exactly once afterwards.
    pub fn scroll_to_target(
        &mut self,
        target: ScrollTarget,
        on_complete: impl FnOnce(ScrollOutcome) + 'static,
    ) {
        let completion = ScrollCompletion::new(on_complete);
        if target.delta.is_zero() {
            completion.complete();
            return;
        }
        self.requests += 1;
        self.driver
            .scroll_by(target.container, target.delta, self.behavior, completion);
    }
}

impl fmt::Debug for ScrollCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollCoordinator")
            .field("behavior", &self.behavior)
            .field("requests", &self.requests)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::ElementId;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Outcomes = Rc<RefCell<Vec<ScrollOutcome>>>;

    fn recorder() -> (Outcomes, impl FnOnce(ScrollOutcome) + 'static) {
        let outcomes: Outcomes = Rc::default();
        let sink = outcomes.clone();
        (outcomes, move |o| sink.borrow_mut().push(o))
    }

    fn target(dx: i32, dy: i32) -> ScrollTarget {
        ScrollTarget {
            container: ContainerId(1),
            element: ElementId(1),
            delta: ScrollDelta::new(dx, dy),
        }
    }

    /// Keeps completions until told what to do with them.
    #[derive(Default)]
    struct HoldingDriver {
        held: Rc<RefCell<Vec<(ScrollDelta, ScrollBehavior, ScrollCompletion)>>>,
    }

    impl ScrollDriver for HoldingDriver {
        fn scroll_by(
            &mut self,
            _container: ContainerId,
            delta: ScrollDelta,
            behavior: ScrollBehavior,
            completion: ScrollCompletion,
        ) {
            self.held.borrow_mut().push((delta, behavior, completion));
        }
    }

    #[test]
    fn completion_fires_once_on_complete() {
        let (outcomes, cb) = recorder();
        let completion = ScrollCompletion::new(cb);
        completion.complete();
        assert_eq!(*outcomes.borrow(), vec![ScrollOutcome::Settled]);
    }

    #[test]
    fn dropped_completion_reports_abandoned() {
        let (outcomes, cb) = recorder();
        drop(ScrollCompletion::new(cb));
        assert_eq!(*outcomes.borrow(), vec![ScrollOutcome::Abandoned]);
    }

    #[test]
    fn explicit_abandon_fires_once() {
        let (outcomes, cb) = recorder();
        ScrollCompletion::new(cb).abandon();
        assert_eq!(*outcomes.borrow(), vec![ScrollOutcome::Abandoned]);
    }

    #[test]
    fn zero_delta_completes_without_driver() {
        let driver = HoldingDriver::default();
        let held = driver.held.clone();
        let mut coordinator = ScrollCoordinator::new(Box::new(driver), ScrollBehavior::Smooth);
        let (outcomes, cb) = recorder();

        coordinator.scroll_to_target(target(0, 0), cb);

        assert_eq!(*outcomes.borrow(), vec![ScrollOutcome::Settled]);
        assert!(held.borrow().is_empty());
        assert_eq!(coordinator.requests(), 0);
    }

    #[test]
    fn nonzero_delta_waits_for_driver() {
        let driver = HoldingDriver::default();
        let held = driver.held.clone();
        let mut coordinator = ScrollCoordinator::new(Box::new(driver), ScrollBehavior::Immediate);
        let (outcomes, cb) = recorder();

        coordinator.scroll_to_target(target(0, 240), cb);
        assert!(outcomes.borrow().is_empty());

        let (delta, behavior, completion) = held.borrow_mut().pop().expect("held request");
        assert_eq!(delta, ScrollDelta::new(0, 240));
        assert_eq!(behavior, ScrollBehavior::Immediate);
        completion.complete();
        assert_eq!(*outcomes.borrow(), vec![ScrollOutcome::Settled]);
        assert_eq!(coordinator.requests(), 1);
    }

    #[test]
    fn destroyed_driver_still_notifies() {
        let driver = HoldingDriver::default();
        let mut coordinator = ScrollCoordinator::new(Box::new(driver), ScrollBehavior::Smooth);
        let (outcomes, cb) = recorder();

        coordinator.scroll_to_target(target(5, 5), cb);
        drop(coordinator);

        assert_eq!(*outcomes.borrow(), vec![ScrollOutcome::Abandoned]);
    }
}
