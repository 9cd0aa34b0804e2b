//! Hardware interface layer for the Tabula chess board
//!
//! This crate provides the trait-based device interface and the declarative
//! board configuration data consumed by the firmware crate, enabling
//! development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! GUI library boundary (gui crate)
//!         ↓
//! Platform interface (this crate - traits + board data)
//!         ↓
//! Panel drivers (out of tree)
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `defmt`: Enable defmt logging derives
//! - `serde`: Enable serialization derives on capability/format data

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)] // pure data accessors — callers decide

pub mod board;
pub mod boards;
pub mod device;
pub mod mocks;
pub mod pixel;

pub use board::{
    align_up, static_buffer_bytes, static_pixel_count, BoardConfig, BoardConfigError, BufferMode,
    LogVerbosity, MemoryMode, PanelConfig,
};
pub use device::{DeviceClass, DeviceError, DisplayDevice, FrameRegion};
pub use pixel::{buffer_bytes, Capabilities, PixelFormat};
