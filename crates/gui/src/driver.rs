//! Per-display driver record
//!
//! The record the boot-time adapter assembles and registers: resolution,
//! draw-buffer descriptor, refresh mode, the device-class-resolved render
//! callback and the opaque render state (currently just the blanking flag).

use alloc::boxed::Box;

use platform::{DeviceError, DisplayDevice, FrameRegion};

use crate::draw_buffer::DrawBuffer;

/// Opaque per-display render state.
///
/// After boot this is owned exclusively by the display's render path; the
/// provisioning subsystem never touches it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderState {
    /// While set, flushes are accepted but not pushed to the panel.
    pub blanking_on: bool,
}

/// Render (flush) callback: push packed pixels covering `region` to the
/// panel device. Resolved per device class by the driver adapter.
pub type RenderFn =
    fn(device: &mut dyn DisplayDevice, region: &FrameRegion, pixels: &[u8]) -> Result<(), DeviceError>;

/// A registered display: everything the library needs to render and flush.
pub struct DisplayDriver {
    /// Horizontal resolution the buffers are sized for.
    pub hor_res: u16,
    /// Vertical resolution the buffers are sized for.
    pub ver_res: u16,
    /// Redraw the whole frame instead of dirty rectangles.
    pub full_refresh: bool,
    draw_buf: DrawBuffer,
    render: RenderFn,
    state: RenderState,
    device: Box<dyn DisplayDevice>,
}

impl DisplayDriver {
    /// Assemble a driver record. Called by the boot-time adapter only.
    pub fn new(
        hor_res: u16,
        ver_res: u16,
        full_refresh: bool,
        draw_buf: DrawBuffer,
        render: RenderFn,
        device: Box<dyn DisplayDevice>,
    ) -> Self {
        Self {
            hor_res,
            ver_res,
            full_refresh,
            draw_buf,
            render,
            state: RenderState::default(),
            device,
        }
    }

    /// The draw-buffer descriptor this display renders into.
    pub fn draw_buf(&self) -> &DrawBuffer {
        &self.draw_buf
    }

    /// Mutable access for the library's render path.
    pub fn draw_buf_mut(&mut self) -> &mut DrawBuffer {
        &mut self.draw_buf
    }

    /// Whether flushes are currently suppressed.
    pub fn blanking_on(&self) -> bool {
        self.state.blanking_on
    }

    /// Suppress or resume panel flushes.
    pub fn set_blanking(&mut self, on: bool) {
        self.state.blanking_on = on;
    }

    /// The owned panel device.
    pub fn device(&self) -> &dyn DisplayDevice {
        self.device.as_ref()
    }

    /// Flush the active buffer's contents covering `region`.
    ///
    /// A blanked display accepts the flush without touching the panel; a
    /// double-buffered display flips after a successful flush.
    pub fn flush(&mut self, region: &FrameRegion) -> Result<(), DeviceError> {
        if !self.state.blanking_on {
            (self.render)(self.device.as_mut(), region, self.draw_buf.active())?;
        }
        self.draw_buf.flip();
        Ok(())
    }

    /// Flush the whole frame.
    pub fn flush_frame(&mut self) -> Result<(), DeviceError> {
        self.flush(&FrameRegion::full(self.hor_res, self.ver_res))
    }
}
