#![forbid(unsafe_code)]

//! Test harness for showcase tours.
//!
//! In-memory stand-ins for every collaborator a tour talks to, each
//! scriptable from a test and each safe to call back into the tour:
//!
//! - [`FakeLayout`]: editable element bounds and scrollable containers.
//! - [`RecordingSurface`]: logs overlays and replays taps.
//! - [`ManualScrollDriver`]: scrolls settle when the test says so.
//! - [`HostSwitch`]: host liveness as a flag.
//! - [`trace_capture`]: span and event capture for log assertions.

pub mod host;
pub mod layout;
pub mod scroll;
pub mod surface;
pub mod trace_capture;

pub use host::HostSwitch;
pub use layout::FakeLayout;
pub use scroll::{ManualScrollDriver, ScrollRequest};
pub use surface::{RecordingSurface, SurfaceEvent};
pub use trace_capture::{CaptureHandle, CapturedEvent, CapturedSpan, with_captured_spans};
