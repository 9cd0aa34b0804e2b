//! Render (flush) callbacks
//!
//! One callback per panel family, resolved through the adapter's
//! class-keyed table. Each callback validates that the pixel slice
//! actually covers the region before touching the device; a mismatch is
//! an `InvalidWindow` bus-level error, not a silent partial write.

use platform::{DeviceError, DisplayDevice, FrameRegion};

/// Stream 16-bit RGB565 pixels to a windowed TFT controller.
pub fn stream_rgb565(
    device: &mut dyn DisplayDevice,
    region: &FrameRegion,
    pixels: &[u8],
) -> Result<(), DeviceError> {
    let expected = (region.pixel_count() as usize).checked_mul(2);
    if expected != Some(pixels.len()) {
        return Err(DeviceError::InvalidWindow);
    }
    device.write_window(region, pixels)
}

/// Push a row-packed 1-bit frame to a monochrome controller.
///
/// The controller consumes whole bytes per row, so the region width must
/// be a multiple of 8.
pub fn packed_mono(
    device: &mut dyn DisplayDevice,
    region: &FrameRegion,
    pixels: &[u8],
) -> Result<(), DeviceError> {
    if region.width & 7 != 0 {
        return Err(DeviceError::InvalidWindow);
    }
    let expected = (region.pixel_count() as usize).checked_div(8);
    if expected != Some(pixels.len()) {
        return Err(DeviceError::InvalidWindow);
    }
    device.write_window(region, pixels)
}
