#![forbid(unsafe_code)]

//! A scroll driver the test settles by hand.
//!
//! Requests queue up until the test calls [`ManualScrollDriver::settle_next`]
//! (or switches to immediate mode). Settling applies the delta to the
//! attached [`FakeLayout`] before the completion fires, the way a real
//! container would have moved by the time its scroll ends.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use showcase_core::{ContainerId, ScrollDelta};
use showcase_step::{ScrollBehavior, ScrollCompletion, ScrollDriver};

use crate::layout::FakeLayout;

/// A request as the driver received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub container: ContainerId,
    pub delta: ScrollDelta,
    pub behavior: ScrollBehavior,
}

#[derive(Default)]
struct State {
    layout: Option<FakeLayout>,
    immediate: bool,
    history: Vec<ScrollRequest>,
    pending: VecDeque<(ScrollRequest, ScrollCompletion)>,
}

/// Queues scrolls until told to settle them. Clones share the queue.
#[derive(Clone, Default)]
pub struct ManualScrollDriver {
    state: Rc<RefCell<State>>,
}

impl ManualScrollDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply settled deltas to `layout`.
    pub fn with_layout(layout: FakeLayout) -> Self {
        let driver = Self::default();
        driver.state.borrow_mut().layout = Some(layout);
        driver
    }

    /// Settle every request inside `scroll_by`.
    pub fn immediate(self) -> Self {
        self.state.borrow_mut().immediate = true;
        self
    }

    /// Every request received, settled or not.
    pub fn requests(&self) -> Vec<ScrollRequest> {
        self.state.borrow().history.clone()
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Settle the oldest pending request. Returns `false` if none.
    pub fn settle_next(&self) -> bool {
        let next = self.state.borrow_mut().pending.pop_front();
        let Some((request, completion)) = next else {
            return false;
        };
        self.apply(request);
        completion.complete();
        true
    }

    /// Settle every pending request, including ones queued while settling.
    pub fn settle_all(&self) -> usize {
        let mut settled = 0;
        while self.settle_next() {
            settled += 1;
        }
        settled
    }

    /// Drop every pending request without moving anything.
    pub fn abandon_all(&self) -> usize {
        let pending: Vec<_> = self.state.borrow_mut().pending.drain(..).collect();
        let count = pending.len();
        drop(pending);
        count
    }

    fn apply(&self, request: ScrollRequest) {
        let layout = self.state.borrow().layout.clone();
        if let Some(layout) = layout {
            layout.scroll_by(request.container, request.delta);
        }
    }
}

impl ScrollDriver for ManualScrollDriver {
    fn scroll_by(
        &mut self,
        container: ContainerId,
        delta: ScrollDelta,
        behavior: ScrollBehavior,
        completion: ScrollCompletion,
    ) {
        let request = ScrollRequest {
            container,
            delta,
            behavior,
        };
        let immediate = {
            let mut state = self.state.borrow_mut();
            state.history.push(request);
            state.immediate
        };
        if immediate {
            self.apply(request);
            completion.complete();
        } else {
            self.state
                .borrow_mut()
                .pending
                .push_back((request, completion));
        }
    }
}
