#![forbid(unsafe_code)]

use std::cell::Cell;
use std::rc::Rc;

use showcase_step::HostLiveness;

/// Host liveness flipped by the test. Clones share the flag.
#[derive(Debug, Clone)]
pub struct HostSwitch {
    active: Rc<Cell<bool>>,
}

impl HostSwitch {
    /// Starts active.
    pub fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
        }
    }

    /// Simulate the host being torn down.
    pub fn deactivate(&self) {
        self.active.set(false);
    }

    pub fn activate(&self) {
        self.active.set(true);
    }
}

impl Default for HostSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLiveness for HostSwitch {
    fn is_host_active(&self) -> bool {
        self.active.get()
    }
}
