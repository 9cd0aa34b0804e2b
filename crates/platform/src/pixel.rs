//! Pixel formats and display capability records
//!
//! The capability record is the ground truth a panel driver reports at boot.
//! Buffer sizing is a pure function of the pixel format and the pixel count;
//! it never depends on accumulated state.

/// Pixel formats a panel driver may report.
///
/// The set mirrors the formats the GUI library can render into. Formats
/// without a sizing rule (`Bgr565`, `Gray4`) are reported by some panels but
/// are not renderable; provisioning rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PixelFormat {
    /// 32-bit ARGB, 8 bits per channel.
    Argb8888,
    /// 24-bit RGB, 8 bits per channel, no alpha.
    Rgb888,
    /// 16-bit RGB 5-6-5.
    Rgb565,
    /// 16-bit BGR 5-6-5 (reported by some controllers; not renderable).
    Bgr565,
    /// 1-bit monochrome, 0 = black.
    Mono01,
    /// 1-bit monochrome, 0 = white (inverted polarity).
    Mono10,
    /// 4-bit grayscale (not renderable).
    Gray4,
}

impl PixelFormat {
    /// Bits each pixel occupies in a packed buffer.
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Argb8888 => 32,
            Self::Rgb888 => 24,
            Self::Rgb565 | Self::Bgr565 => 16,
            Self::Mono01 | Self::Mono10 => 1,
            Self::Gray4 => 4,
        }
    }
}

/// Buffer size in bytes for `pixel_count` pixels of `format`.
///
/// Returns `None` when the format has no defined sizing rule — the caller
/// maps that to an unsupported-pixel-format failure. Monochrome formats
/// round up to whole bytes (241 pixels → 31 bytes, not 30).
pub fn buffer_bytes(format: PixelFormat, pixel_count: u32) -> Option<usize> {
    let pixels = pixel_count as usize;
    match format {
        PixelFormat::Argb8888 => pixels.checked_mul(4),
        PixelFormat::Rgb888 => pixels.checked_mul(3),
        PixelFormat::Rgb565 => pixels.checked_mul(2),
        // One bit per pixel, rounded up to a whole byte.
        PixelFormat::Mono01 | PixelFormat::Mono10 => Some(pixels.div_ceil(8)),
        PixelFormat::Bgr565 | PixelFormat::Gray4 => None,
    }
}

/// Capability record a ready panel driver reports.
///
/// Downstream stages validate configured dimensions against this; the
/// record itself carries no policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Capabilities {
    /// Largest horizontal resolution the panel supports.
    pub max_x_resolution: u16,
    /// Largest vertical resolution the panel supports.
    pub max_y_resolution: u16,
    /// Pixel format the panel is currently configured for.
    pub current_pixel_format: PixelFormat,
}
