//! Panel device interface
//!
//! Every physical panel is driven by an out-of-tree driver that exposes the
//! small boot-time contract below: a readiness probe, a capability query and
//! a raw frame-window write used by the render callbacks. Panel drivers
//! themselves are not part of this workspace.

use crate::pixel::Capabilities;

/// Panel controller classes the render path knows how to flush.
///
/// The driver adapter resolves the render callback through a table keyed by
/// this class, so new controllers are added by extending the table rather
/// than by modifying the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceClass {
    /// Sitronix ST7789 SPI TFT (the per-player 240×240 square panels).
    St7789,
    /// Galaxycore GC9A01 round SPI TFT (clock-face variant).
    Gc9a01,
    /// Solomon Systech SSD1306 monochrome OLED (devkit status panel).
    Ssd1306,
    /// Sharp memory-in-pixel LCD (LS0xx family; no callback mapping yet).
    SharpMemoryLcd,
}

/// Errors a panel driver can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Driver not initialized or panel absent.
    NotReady,
    /// Bus transfer failed.
    Bus,
    /// Window coordinates outside the panel or misaligned for the controller.
    InvalidWindow,
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotReady => write!(f, "Panel device not ready"),
            Self::Bus => write!(f, "Panel bus transfer failed"),
            Self::InvalidWindow => write!(f, "Invalid frame window"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeviceError {}

/// Rectangular window of a frame, in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameRegion {
    /// Left edge, pixels.
    pub x: u16,
    /// Top edge, pixels.
    pub y: u16,
    /// Width, pixels.
    pub width: u16,
    /// Height, pixels.
    pub height: u16,
}

impl FrameRegion {
    /// Full-frame window for a `width`×`height` panel.
    pub const fn full(width: u16, height: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Number of pixels covered by the window.
    #[allow(clippy::arithmetic_side_effects)] // u32 product of two u16 extents
    pub const fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

/// Boot-time contract of a panel device driver.
///
/// `is_ready` and `capabilities` are the negotiation surface; `write_window`
/// is the flush target the registered render callback drives after boot.
pub trait DisplayDevice {
    /// Controller class, used to resolve the render callback.
    fn class(&self) -> DeviceClass;

    /// Whether the driver has completed its own initialization.
    fn is_ready(&self) -> bool;

    /// True supported resolution and current pixel format.
    ///
    /// Only meaningful once [`Self::is_ready`] reports `true`.
    fn capabilities(&self) -> Capabilities;

    /// Push packed pixel data covering `region` to the panel.
    fn write_window(&mut self, region: &FrameRegion, pixels: &[u8]) -> Result<(), DeviceError>;
}
