//! Draw-buffer descriptor
//!
//! Points at one or two raw pixel buffers plus the pixel count they back.
//! With two buffers the library renders into one while the other is being
//! flushed; `flip` swaps the roles after each flush.

use alloc::boxed::Box;

/// One or two pixel buffers and their shared pixel-count metadata.
///
/// Invariant: a descriptor always holds at least the primary buffer; a
/// display never ends provisioning with zero buffers.
#[derive(Debug)]
pub struct DrawBuffer {
    primary: Box<[u8]>,
    secondary: Option<Box<[u8]>>,
    pixel_count: u32,
    /// Which buffer the library currently renders into (0 or 1).
    active: u8,
}

impl DrawBuffer {
    /// Wrap the provisioned buffers into a descriptor.
    ///
    /// `pixel_count` is the number of pixels each buffer can hold; both
    /// buffers of a double-buffered descriptor are the same size.
    pub fn init(primary: Box<[u8]>, secondary: Option<Box<[u8]>>, pixel_count: u32) -> Self {
        Self {
            primary,
            secondary,
            pixel_count,
            active: 0,
        }
    }

    /// Pixels each buffer holds.
    pub fn pixel_count(&self) -> u32 {
        self.pixel_count
    }

    /// Bytes in the primary buffer.
    pub fn byte_len(&self) -> usize {
        self.primary.len()
    }

    /// Whether a secondary buffer is present.
    pub fn is_double(&self) -> bool {
        self.secondary.is_some()
    }

    /// Buffer the library currently renders into.
    pub fn active(&self) -> &[u8] {
        match (&self.secondary, self.active) {
            (Some(secondary), 1) => secondary,
            _ => &self.primary,
        }
    }

    /// Mutable view of the render-target buffer.
    pub fn active_mut(&mut self) -> &mut [u8] {
        match (&mut self.secondary, self.active) {
            (Some(secondary), 1) => secondary,
            _ => &mut self.primary,
        }
    }

    /// Swap render and flush roles. No-op for single-buffer descriptors.
    pub fn flip(&mut self) {
        if self.secondary.is_some() {
            self.active ^= 1;
        }
    }
}
