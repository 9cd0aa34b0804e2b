//! Scriptable mock panel for host tests
//!
//! Implements [`DisplayDevice`] with programmable readiness, capabilities
//! and write behavior so the provisioning and boot paths can be exercised
//! without hardware.

use crate::device::{DeviceClass, DeviceError, DisplayDevice, FrameRegion};
use crate::pixel::{Capabilities, PixelFormat};

/// A panel device with scripted behavior.
#[derive(Debug, Clone)]
pub struct MockPanel {
    class: DeviceClass,
    ready: bool,
    caps: Capabilities,
    fail_writes: bool,
    /// Number of `write_window` calls that reached the device.
    pub writes: usize,
    /// Total pixel bytes accepted across all writes.
    pub bytes_written: usize,
    /// Region of the most recent accepted write.
    pub last_region: Option<FrameRegion>,
}

impl MockPanel {
    /// Ready panel with the given class and capabilities.
    pub fn new(class: DeviceClass, caps: Capabilities) -> Self {
        Self {
            class,
            ready: true,
            caps,
            fail_writes: false,
            writes: 0,
            bytes_written: 0,
            last_region: None,
        }
    }

    /// Ready 240×240 RGB565 ST7789, the shipping panel shape.
    pub fn st7789_240() -> Self {
        Self::new(
            DeviceClass::St7789,
            Capabilities {
                max_x_resolution: 240,
                max_y_resolution: 240,
                current_pixel_format: PixelFormat::Rgb565,
            },
        )
    }

    /// Ready 128×64 monochrome SSD1306, the devkit panel shape.
    pub fn ssd1306_128x64() -> Self {
        Self::new(
            DeviceClass::Ssd1306,
            Capabilities {
                max_x_resolution: 128,
                max_y_resolution: 64,
                current_pixel_format: PixelFormat::Mono01,
            },
        )
    }

    /// Mark the panel as not ready; negotiation must fail.
    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    /// Report a different pixel format than the constructor default.
    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.caps.current_pixel_format = format;
        self
    }

    /// Make every `write_window` fail with a bus error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl DisplayDevice for MockPanel {
    fn class(&self) -> DeviceClass {
        self.class
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn write_window(&mut self, region: &FrameRegion, pixels: &[u8]) -> Result<(), DeviceError> {
        if !self.ready {
            return Err(DeviceError::NotReady);
        }
        if self.fail_writes {
            return Err(DeviceError::Bus);
        }
        self.writes = self.writes.saturating_add(1);
        self.bytes_written = self.bytes_written.saturating_add(pixels.len());
        self.last_region = Some(*region);
        Ok(())
    }
}
