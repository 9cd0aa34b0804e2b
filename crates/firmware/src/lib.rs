//! Tabula boot-time display provisioning
//!
//! Everything between the board's static configuration and a populated
//! GUI display registry:
//!
//! - [`display::materialize`] — board config → ordered display descriptors
//!   (static buffer reservation happens here)
//! - [`display::negotiate`] — capability snapshot from a ready device
//! - [`display::provision`] — static/dynamic buffer sizing and allocation
//! - [`display::adapter`] — driver-record assembly and registration
//! - [`boot::BootOrchestrator`] — the once-only init state machine tying
//!   the stages together with the memory pool, log bridge, filesystem and
//!   input seams
//!
//! Every failure is fatal to boot; [`boot::exit_code`] maps the outcome to
//! the code the boot sequencer consumes.

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

pub mod boot;
pub mod display;
pub mod error;
pub mod fs;
#[cfg(feature = "hardware")]
pub mod heap;
pub mod input;
pub mod memory;

pub use boot::{exit_code, BootOrchestrator, InitState, MAX_POOL_BYTES};
pub use display::adapter::{CallbackTable, DEFAULT_CALLBACKS};
pub use display::DisplayDescriptor;
pub use error::{Axis, InitError};
pub use fs::{FilesystemAdapter, NullFilesystem};
pub use input::{InputSubsystem, NullInput};
pub use memory::{AllocError, MemoryPool};
