#![forbid(unsafe_code)]

//! A rendering surface that records instead of drawing.
//!
//! Every call the tour makes lands in an ordered [`SurfaceEvent`] log.
//! Tests play the user by tapping overlays through the recorded touch
//! callbacks. No internal borrow is held while a callback runs, so the tour
//! is free to show or hide overlays in response.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use showcase_step::{OverlayHandle, OverlayId, OverlayRequest, RenderSurface, TouchCallback};

/// One call the tour made on the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Shown { id: OverlayId, request: OverlayRequest },
    Hidden(OverlayId),
    CardHidden(OverlayId),
    Progress { id: OverlayId, index: usize, total: usize },
}

#[derive(Default)]
struct State {
    next_id: u64,
    events: Vec<SurfaceEvent>,
    callbacks: HashMap<OverlayId, TouchCallback>,
    auto_tap: Option<bool>,
}

/// Records overlays and replays taps. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    state: Rc<RefCell<State>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tap every overlay as soon as it is shown, from inside
    /// `show_overlay`. `None` turns this off.
    pub fn auto_tap(&self, hit: Option<bool>) {
        self.state.borrow_mut().auto_tap = hit;
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.state.borrow().events.clone()
    }

    /// Requests of every overlay shown, in order.
    pub fn shown(&self) -> Vec<(OverlayId, OverlayRequest)> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Shown { id, request } => Some((*id, request.clone())),
                _ => None,
            })
            .collect()
    }

    /// Titles of every overlay shown, in order.
    pub fn titles(&self) -> Vec<String> {
        self.shown().into_iter().map(|(_, r)| r.title).collect()
    }

    pub fn latest(&self) -> Option<OverlayId> {
        self.shown().last().map(|(id, _)| *id)
    }

    /// Overlays shown and not hidden since.
    pub fn visible(&self) -> Vec<OverlayId> {
        let state = self.state.borrow();
        let mut visible = Vec::new();
        for event in &state.events {
            match event {
                SurfaceEvent::Shown { id, .. } => visible.push(*id),
                SurfaceEvent::Hidden(id) => visible.retain(|v| v != id),
                _ => {}
            }
        }
        visible
    }

    /// `(index, total)` pairs, in the order they were set.
    pub fn progress(&self) -> Vec<(usize, usize)> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Progress { index, total, .. } => Some((*index, *total)),
                _ => None,
            })
            .collect()
    }

    /// Tap overlay `id`. Returns `false` if it was never shown.
    pub fn tap(&self, id: OverlayId, hit: bool) -> bool {
        let taken = self.state.borrow_mut().callbacks.remove(&id);
        let Some(mut callback) = taken else {
            return false;
        };
        callback(hit);
        self.state.borrow_mut().callbacks.insert(id, callback);
        true
    }

    /// Tap the most recently shown overlay.
    pub fn tap_latest(&self, hit: bool) -> bool {
        self.latest().is_some_and(|id| self.tap(id, hit))
    }

    fn record(&self, event: SurfaceEvent) {
        self.state.borrow_mut().events.push(event);
    }
}

impl RenderSurface for RecordingSurface {
    fn show_overlay(
        &mut self,
        request: OverlayRequest,
        mut on_touch: TouchCallback,
    ) -> Box<dyn OverlayHandle> {
        let (id, auto_tap) = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = OverlayId(state.next_id);
            state.events.push(SurfaceEvent::Shown { id, request });
            (id, state.auto_tap)
        };
        if let Some(hit) = auto_tap {
            on_touch(hit);
        }
        self.state.borrow_mut().callbacks.insert(id, on_touch);
        Box::new(RecordedOverlay {
            id,
            surface: self.clone(),
        })
    }
}

struct RecordedOverlay {
    id: OverlayId,
    surface: RecordingSurface,
}

impl OverlayHandle for RecordedOverlay {
    fn id(&self) -> OverlayId {
        self.id
    }

    fn hide(&mut self) {
        self.surface.record(SurfaceEvent::Hidden(self.id));
    }

    fn hide_card(&mut self) {
        self.surface.record(SurfaceEvent::CardHidden(self.id));
    }

    fn set_progress(&mut self, index: usize, total: usize) {
        self.surface.record(SurfaceEvent::Progress {
            id: self.id,
            index,
            total,
        });
    }
}
