//! Display-driver boundary of the Tabula GUI library
//!
//! The retained-mode GUI library proper (widget tree, invalidation, timers)
//! lives out of tree. This crate is the surface the firmware wires panels
//! into at boot:
//!
//! - [`DrawBuffer`] — one or two raw pixel buffers plus pixel-count metadata
//! - [`DisplayDriver`] — per-display driver record (resolution, buffers,
//!   refresh mode, render callback, blanking state, owned device)
//! - [`DriverRegistry`] / [`GuiCore`] — the display registry and the
//!   library's init-once core state, owned by the boot orchestrator rather
//!   than living in ambient globals
//! - [`log`] — the severity-tagged log line bridge to the host log sink
//!
//! After registration the library owns each display's buffers and invokes
//! the render callback from its own update mechanism; the provisioning
//! subsystem holds no further shared state.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

extern crate alloc;

pub mod core_state;
pub mod draw_buffer;
pub mod driver;
pub mod log;
pub mod registry;

pub use core_state::GuiCore;
pub use draw_buffer::DrawBuffer;
pub use driver::{DisplayDriver, RenderFn, RenderState};
pub use log::{parse_tagged_line, Level, LogBridge, LogSink, RecordingSink, Severity};
pub use registry::{DriverHandle, DriverRegistry, RegistryError, MAX_DISPLAYS};
