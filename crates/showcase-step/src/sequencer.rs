#![forbid(unsafe_code)]

//! The tour state machine.
//!
//! # States
//!
//! ```text
//!           start                 scroll settled
//!   Idle ──────────▶ AwaitingScroll ───────────▶ Displaying
//!    ▲      │                ▲                      │  │
//!    │      └────────────────┼──────────────────────┘  │ tap
//!    │     (no scroll needed)└────── next step ◀───────┤
//!    └───────────────── dismiss / last step ◀──────────┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one overlay is owned; the previous one is hidden before the
//!    next is installed.
//! 2. Every callback handed out (touch, scroll completion) carries a
//!    [`Ticket`]. A callback whose ticket no longer matches is ignored,
//!    except a target tap with a listener registered, which dismisses any
//!    running tour.
//! 3. No transition runs inside another. Entry points enqueue a message and
//!    only the outermost call drains the queue, so collaborators may call
//!    back synchronously.
//! 4. The click listener runs with no internal state borrowed and may call
//!    back into the sequencer.
//!
//! # Failure Modes
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | Callback after the tour moved on | ignored, logged as `stale_callback` |
//! | Target element cannot be measured | fallback point, `missing_anchor_target` |
//! | Host torn down | display skipped, `inactive_host` |
//! | Scroll driver dropped the request | display proceeds at the current layout |

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use showcase_core::{
    Degradation, LayoutQuery, PositionResolver, RadiusPolicy, ResolvedPoint, Step,
};
use tracing::{Span, debug, info_span};

use crate::config::TourConfig;
use crate::error::TourError;
use crate::scroll::{ScrollCoordinator, ScrollOutcome};
use crate::surface::{HostLiveness, OverlayHandle, OverlayRequest, RenderSurface, TouchCallback};

/// Called when the user taps the highlighted target.
///
/// Receives the sequencer, already dismissed, and the overlay that was
/// tapped.
pub type TargetClickListener = Box<dyn FnMut(&TourSequencer, Box<dyn OverlayHandle>)>;

/// Where the tour is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourPhase {
    /// Not started, finished, or dismissed.
    #[default]
    Idle,
    /// Waiting for the container to reveal step `index`.
    AwaitingScroll { index: usize },
    /// Step `index` is on screen.
    Displaying { index: usize },
}

impl TourPhase {
    /// Index of the step being revealed or shown.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::AwaitingScroll { index } | Self::Displaying { index } => Some(index),
        }
    }

    #[inline]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Snapshot of the sequencer, readable at any time, including from inside
/// collaborator callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TourStatus {
    pub phase: TourPhase,
    /// `None` until the first step is reached and after dismissal.
    pub current_index: Option<usize>,
    pub step_count: usize,
    /// Generation counter; bumped whenever outstanding callbacks go stale.
    pub epoch: u64,
}

/// Identity of a callback: the generation and step it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub epoch: u64,
    pub index: usize,
}

#[derive(Debug, Clone, Copy)]
enum TourMsg {
    Start,
    Dismiss,
    Touch { ticket: Ticket, hit: bool },
    ScrollSettled { ticket: Ticket, outcome: ScrollOutcome },
}

// ---------------------------------------------------------------------------
// Core state
// ---------------------------------------------------------------------------

pub(crate) struct Collaborators {
    pub(crate) surface: Box<dyn RenderSurface>,
    pub(crate) layout: Box<dyn LayoutQuery>,
    pub(crate) liveness: Box<dyn HostLiveness>,
    pub(crate) scroller: Option<ScrollCoordinator>,
}

struct TourCore {
    steps: Vec<Step>,
    current: Option<usize>,
    overlay: Option<Box<dyn OverlayHandle>>,
    phase: TourPhase,
    epoch: u64,
    resolver: PositionResolver,
    radius: RadiusPolicy,
    has_listener: bool,
    io: Collaborators,
    this: Weak<Shared>,
}

impl TourCore {
    fn status(&self) -> TourStatus {
        TourStatus {
            phase: self.phase,
            current_index: self.current,
            step_count: self.steps.len(),
            epoch: self.epoch,
        }
    }

    /// Apply one message. Returns the tapped overlay when the click
    /// listener must be notified.
    fn handle(&mut self, msg: TourMsg, config: &TourConfig) -> Option<Box<dyn OverlayHandle>> {
        match msg {
            TourMsg::Start => {
                self.start(config);
                None
            }
            TourMsg::Dismiss => {
                drop(self.dismiss());
                None
            }
            TourMsg::Touch { ticket, hit } => self.on_touch(ticket, hit, config),
            TourMsg::ScrollSettled { ticket, outcome } => {
                self.on_scroll_settled(ticket, outcome, config);
                None
            }
        }
    }

    fn start(&mut self, config: &TourConfig) {
        let _span = info_span!("showcase.tour.start", steps = self.steps.len()).entered();
        if !self.phase.is_idle() {
            debug!(phase = ?self.phase, "start ignored: tour already running");
            return;
        }
        self.current = None;
        self.try_show_next(config);
    }

    fn try_show_next(&mut self, config: &TourConfig) {
        if !self.io.liveness.is_host_active() {
            debug!(
                degradation = Degradation::InactiveHost.as_str(),
                resolution = Degradation::InactiveHost.resolution(),
                "host inactive, not advancing"
            );
            return;
        }
        let next = self.current.map_or(0, |i| i + 1);
        if next >= self.steps.len() {
            debug!(shown = self.steps.len(), "last step passed");
            drop(self.dismiss());
            return;
        }
        self.current = Some(next);
        self.display_step(next, config);
    }

    fn display_step(&mut self, index: usize, config: &TourConfig) {
        let Some(step) = self.steps.get(index) else {
            return;
        };
        let anchor = *step.anchor();
        let _span = self.display_span(index).entered();

        let target = self
            .io
            .scroller
            .as_ref()
            .and_then(|_| self.resolver.scroll_target(&anchor, &*self.io.layout));
        let Some(target) = target else {
            self.do_display(index, config);
            return;
        };

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.hide_card();
        }
        let ticket = self.issue_ticket(index);
        self.phase = TourPhase::AwaitingScroll { index };
        debug!(
            container = target.container.0,
            element = target.element.0,
            dx = target.delta.dx,
            dy = target.delta.dy,
            "scroll requested"
        );
        let this = self.this.clone();
        if let Some(scroller) = self.io.scroller.as_mut() {
            scroller.scroll_to_target(target, move |outcome| {
                if let Some(shared) = this.upgrade() {
                    Shared::dispatch(&shared, TourMsg::ScrollSettled { ticket, outcome });
                }
            });
        }
    }

    fn do_display(&mut self, index: usize, config: &TourConfig) {
        if !self.io.liveness.is_host_active() {
            debug!(
                degradation = Degradation::InactiveHost.as_str(),
                resolution = Degradation::InactiveHost.resolution(),
                index,
                "host inactive, display skipped"
            );
            return;
        }
        if let Some(mut previous) = self.overlay.take() {
            previous.hide();
        }

        let Some(step) = self.steps.get(index) else {
            return;
        };
        let resolved: ResolvedPoint = self.resolver.resolve(step.anchor(), &*self.io.layout);
        if resolved.fallback {
            debug!(
                degradation = Degradation::MissingAnchorTarget.as_str(),
                resolution = Degradation::MissingAnchorTarget.resolution(),
                element = ?step.anchor().element(),
                "target not measurable"
            );
        }
        let radius = self.radius.radius_for(step, &resolved);
        let request = OverlayRequest {
            point: resolved.point,
            radius,
            layout: config.custom_layout.clone(),
            title: step.title().to_owned(),
            message: step.message().to_owned(),
            tint: config.background_tint,
        };

        let ticket = self.issue_ticket(index);
        let this = self.this.clone();
        let on_touch: TouchCallback = Box::new(move |hit| {
            if let Some(shared) = this.upgrade() {
                Shared::dispatch(&shared, TourMsg::Touch { ticket, hit });
            }
        });
        let mut overlay = self.io.surface.show_overlay(request, on_touch);

        let total = self.steps.len();
        if config.display_progress && total > 1 {
            overlay.set_progress(index, total);
        }
        debug!(
            overlay = %overlay.id(),
            x = resolved.point.x,
            y = resolved.point.y,
            radius,
            "overlay shown"
        );
        self.overlay = Some(overlay);
        self.phase = TourPhase::Displaying { index };
    }

    fn on_touch(
        &mut self,
        ticket: Ticket,
        hit: bool,
        config: &TourConfig,
    ) -> Option<Box<dyn OverlayHandle>> {
        // A target tap ends the tour whichever overlay it came through; the
        // previous overlay stays tappable while the next step scrolls in.
        if hit && self.has_listener && !self.phase.is_idle() {
            return self.dismiss();
        }
        if !self.is_current(ticket) {
            debug!(
                degradation = Degradation::StaleCallback.as_str(),
                resolution = Degradation::StaleCallback.resolution(),
                source = "touch",
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "stale touch"
            );
            return None;
        }
        self.try_show_next(config);
        None
    }

    fn on_scroll_settled(&mut self, ticket: Ticket, outcome: ScrollOutcome, config: &TourConfig) {
        if !self.is_current(ticket) {
            debug!(
                degradation = Degradation::StaleCallback.as_str(),
                resolution = Degradation::StaleCallback.resolution(),
                source = "scroll",
                ?outcome,
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "stale scroll completion"
            );
            return;
        }
        let _span = self.display_span(ticket.index).entered();
        if outcome == ScrollOutcome::Abandoned {
            debug!(index = ticket.index, "scroll abandoned, showing at current layout");
        }
        self.do_display(ticket.index, config);
    }

    /// Hard reset: hide the overlay, forget the steps, invalidate callbacks.
    fn dismiss(&mut self) -> Option<Box<dyn OverlayHandle>> {
        let _span = info_span!(
            "showcase.tour.dismiss",
            index = ?self.current,
            steps = self.steps.len()
        )
        .entered();
        let mut overlay = self.overlay.take();
        if let Some(overlay) = overlay.as_mut() {
            overlay.hide();
        }
        self.current = None;
        self.steps.clear();
        self.phase = TourPhase::Idle;
        self.epoch += 1;
        debug!(epoch = self.epoch, "tour dismissed");
        overlay
    }

    fn issue_ticket(&mut self, index: usize) -> Ticket {
        self.epoch += 1;
        Ticket {
            epoch: self.epoch,
            index,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.epoch == self.epoch && self.current == Some(ticket.index)
    }

    fn display_span(&self, index: usize) -> Span {
        let anchor = self
            .steps
            .get(index)
            .map_or("none", |s| s.anchor().kind_label());
        info_span!(
            "showcase.tour.display",
            index,
            total = self.steps.len(),
            anchor
        )
    }
}

// ---------------------------------------------------------------------------
// Shared cell and message drain
// ---------------------------------------------------------------------------

struct Shared {
    config: TourConfig,
    core: RefCell<TourCore>,
    inbox: RefCell<VecDeque<TourMsg>>,
    draining: Cell<bool>,
    status: Cell<TourStatus>,
    listener: RefCell<Option<TargetClickListener>>,
}

/// Clears the drain flag even if a transition panics.
struct DrainGuard<'a>(&'a Cell<bool>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Shared {
    fn dispatch(shared: &Rc<Shared>, msg: TourMsg) {
        shared.inbox.borrow_mut().push_back(msg);
        if shared.draining.replace(true) {
            return;
        }
        let _guard = DrainGuard(&shared.draining);
        loop {
            let next = shared.inbox.borrow_mut().pop_front();
            let Some(msg) = next else {
                break;
            };
            let clicked = {
                let mut core = shared.core.borrow_mut();
                let clicked = core.handle(msg, &shared.config);
                shared.status.set(core.status());
                clicked
            };
            if let Some(overlay) = clicked {
                Shared::notify_listener(shared, overlay);
            }
        }
    }

    fn notify_listener(shared: &Rc<Shared>, overlay: Box<dyn OverlayHandle>) {
        let taken = shared.listener.borrow_mut().take();
        let Some(mut listener) = taken else {
            return;
        };
        debug!(overlay = %overlay.id(), "target clicked");
        listener(&TourSequencer { shared: shared.clone() }, overlay);
        let mut slot = shared.listener.borrow_mut();
        if slot.is_none() {
            *slot = Some(listener);
        }
    }
}

// ---------------------------------------------------------------------------
// Public handle
// ---------------------------------------------------------------------------

/// A guided tour: an ordered list of steps revealed one at a time.
///
/// Built by [`TourBuilder`](crate::TourBuilder). Cloning yields another
/// handle to the same tour. Single-threaded; not `Send`.
#[derive(Clone)]
pub struct TourSequencer {
    shared: Rc<Shared>,
}

impl TourSequencer {
    pub(crate) fn from_parts(
        config: TourConfig,
        steps: Vec<Step>,
        io: Collaborators,
        listener: Option<TargetClickListener>,
    ) -> Self {
        let resolver = config.resolver();
        let radius = config.radius_policy();
        let has_listener = listener.is_some();
        let shared = Rc::new_cyclic(|this| {
            let core = TourCore {
                steps,
                current: None,
                overlay: None,
                phase: TourPhase::Idle,
                epoch: 0,
                resolver,
                radius,
                has_listener,
                io,
                this: this.clone(),
            };
            Shared {
                config,
                status: Cell::new(core.status()),
                core: RefCell::new(core),
                inbox: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
                listener: RefCell::new(listener),
            }
        });
        Self { shared }
    }

    /// Show the first step. No-op while a tour is running.
    pub fn start(&self) {
        Shared::dispatch(&self.shared, TourMsg::Start);
    }

    /// End the tour from any state: hide the overlay, forget the steps.
    pub fn dismiss(&self) {
        Shared::dispatch(&self.shared, TourMsg::Dismiss);
    }

    /// Append a step. Only while idle.
    pub fn add_step(&self, step: Step) -> Result<(), TourError> {
        self.edit_steps(|steps| steps.push(step))
    }

    /// Replace all steps. Only while idle.
    pub fn set_steps(&self, steps: impl IntoIterator<Item = Step>) -> Result<(), TourError> {
        let steps: Vec<Step> = steps.into_iter().collect();
        self.edit_steps(move |current| *current = steps)
    }

    fn edit_steps(&self, edit: impl FnOnce(&mut Vec<Step>)) -> Result<(), TourError> {
        let mut core = self
            .shared
            .core
            .try_borrow_mut()
            .map_err(|_| TourError::StepsLocked)?;
        if !core.phase.is_idle() {
            return Err(TourError::StepsLocked);
        }
        edit(&mut core.steps);
        self.shared.status.set(core.status());
        Ok(())
    }

    #[inline]
    pub fn status(&self) -> TourStatus {
        self.shared.status.get()
    }

    #[inline]
    pub fn phase(&self) -> TourPhase {
        self.status().phase
    }

    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.status().current_index
    }

    #[inline]
    pub fn step_count(&self) -> usize {
        self.status().step_count
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        !self.phase().is_idle()
    }

    #[inline]
    pub fn config(&self) -> &TourConfig {
        &self.shared.config
    }
}

impl fmt::Debug for TourSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourSequencer")
            .field("status", &self.status())
            .field("config", &self.shared.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::OverlayId;
    use showcase_core::{AnchorSpec, Rect, StaticLayout};

    #[derive(Default)]
    struct Log {
        shown: Vec<(OverlayId, OverlayRequest)>,
        hidden: Vec<OverlayId>,
        callbacks: Vec<TouchCallback>,
    }

    struct TestOverlay {
        id: OverlayId,
        log: Rc<RefCell<Log>>,
    }

    impl OverlayHandle for TestOverlay {
        fn id(&self) -> OverlayId {
            self.id
        }
        fn hide(&mut self) {
            self.log.borrow_mut().hidden.push(self.id);
        }
        fn hide_card(&mut self) {}
        fn set_progress(&mut self, _index: usize, _total: usize) {}
    }

    struct TestSurface {
        log: Rc<RefCell<Log>>,
        next: u64,
    }

    impl RenderSurface for TestSurface {
        fn show_overlay(
            &mut self,
            request: OverlayRequest,
            on_touch: TouchCallback,
        ) -> Box<dyn OverlayHandle> {
            self.next += 1;
            let id = OverlayId(self.next);
            let mut log = self.log.borrow_mut();
            log.shown.push((id, request));
            log.callbacks.push(on_touch);
            Box::new(TestOverlay {
                id,
                log: self.log.clone(),
            })
        }
    }

    fn tour(steps: Vec<Step>) -> (TourSequencer, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let io = Collaborators {
            surface: Box::new(TestSurface {
                log: log.clone(),
                next: 0,
            }),
            layout: Box::new(StaticLayout::new(Rect::from_size(400, 800))),
            liveness: Box::new(|| true),
            scroller: None,
        };
        let seq = TourSequencer::from_parts(TourConfig::default(), steps, io, None);
        (seq, log)
    }

    fn tap(log: &Rc<RefCell<Log>>, which: usize, hit: bool) {
        let mut cb = std::mem::replace(
            &mut log.borrow_mut().callbacks[which],
            Box::new(|_: bool| {}),
        );
        cb(hit);
        log.borrow_mut().callbacks[which] = cb;
    }

    fn steps(n: usize) -> Vec<Step> {
        (0..n)
            .map(|i| Step::new(AnchorSpec::Center, format!("t{i}"), "m"))
            .collect()
    }

    #[test]
    fn phase_index_helper() {
        assert_eq!(TourPhase::Idle.index(), None);
        assert_eq!(TourPhase::AwaitingScroll { index: 2 }.index(), Some(2));
        assert_eq!(TourPhase::Displaying { index: 1 }.index(), Some(1));
    }

    #[test]
    fn start_shows_first_step() {
        let (seq, log) = tour(steps(2));
        seq.start();
        assert_eq!(seq.phase(), TourPhase::Displaying { index: 0 });
        assert_eq!(seq.current_index(), Some(0));
        assert_eq!(log.borrow().shown.len(), 1);
        assert_eq!(log.borrow().shown[0].1.title, "t0");
    }

    #[test]
    fn tapping_advances_and_finishes() {
        let (seq, log) = tour(steps(2));
        seq.start();
        tap(&log, 0, false);
        assert_eq!(seq.phase(), TourPhase::Displaying { index: 1 });
        assert_eq!(log.borrow().hidden, vec![OverlayId(1)]);
        tap(&log, 1, false);
        assert_eq!(seq.phase(), TourPhase::Idle);
        assert_eq!(seq.step_count(), 0);
        assert_eq!(log.borrow().hidden, vec![OverlayId(1), OverlayId(2)]);
    }

    #[test]
    fn hit_without_listener_advances() {
        let (seq, log) = tour(steps(2));
        seq.start();
        tap(&log, 0, true);
        assert_eq!(seq.current_index(), Some(1));
    }

    #[test]
    fn stale_touch_is_ignored() {
        let (seq, log) = tour(steps(3));
        seq.start();
        tap(&log, 0, false);
        let before = seq.status();
        tap(&log, 0, false);
        assert_eq!(seq.status(), before);
    }

    #[test]
    fn steps_locked_while_running() {
        let (seq, _log) = tour(steps(1));
        seq.start();
        assert!(matches!(
            seq.add_step(Step::new(AnchorSpec::Center, "x", "y")),
            Err(TourError::StepsLocked)
        ));
        seq.dismiss();
        assert!(seq.add_step(Step::new(AnchorSpec::Center, "x", "y")).is_ok());
        assert_eq!(seq.step_count(), 1);
        assert!(seq.set_steps(steps(3)).is_ok());
        assert_eq!(seq.step_count(), 3);
    }

    #[test]
    fn dismiss_is_idempotent() {
        let (seq, _log) = tour(steps(2));
        seq.start();
        seq.dismiss();
        let epoch = seq.status().epoch;
        seq.dismiss();
        assert_eq!(seq.phase(), TourPhase::Idle);
        assert_eq!(seq.current_index(), None);
        assert!(seq.status().epoch > epoch);
    }
}
