//! Board configuration schema
//!
//! Per-board display topology and global buffer policy, expressed as plain
//! const data. The firmware materializes its ordered display descriptor list
//! from one of these records at boot; there is no code generation and no
//! mutation after construction.

use crate::device::DeviceClass;

/// How pixel buffers are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BufferMode {
    /// Buffers reserved up front, sized from the configured width/height.
    Static,
    /// Buffers sized from the negotiated capability and allocated at boot.
    Dynamic,
}

/// Where dynamic allocations come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryMode {
    /// Dedicated pool with a fixed byte budget; exhaustion is a boot failure.
    Pool {
        /// Pool budget in bytes. Must be non-zero.
        size: usize,
    },
    /// General heap, no budget enforced by the provisioning subsystem.
    Heap,
}

/// Verbosity of the GUI library's log output.
///
/// `Off` disables installation of the log-severity bridge entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum LogVerbosity {
    /// No log bridge installed.
    Off,
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational and above.
    Info,
    /// Everything, including per-frame tracing.
    Trace,
}

/// One physical panel of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// Devicetree-style node name, for diagnostics.
    pub name: &'static str,
    /// Configured width in pixels. Must not exceed the negotiated maximum.
    pub width: u16,
    /// Configured height in pixels. Must not exceed the negotiated maximum.
    pub height: u16,
    /// Controller class of the attached panel.
    pub class: DeviceClass,
}

/// Complete per-board configuration.
///
/// The panel list is ordered; boot initializes displays in declaration
/// order and aborts on the first failure.
#[derive(Debug, Clone, Copy)]
pub struct BoardConfig {
    /// Board name, for diagnostics.
    pub name: &'static str,
    /// Ordered panel list.
    pub panels: &'static [PanelConfig],
    /// Static vs dynamic buffer provisioning.
    pub buffer_mode: BufferMode,
    /// Bits per pixel used for static sizing. Must match the panels'
    /// configured pixel format.
    pub bits_per_pixel: u8,
    /// Percentage of a full frame each buffer covers, 1..=100.
    pub vdb_percent: u8,
    /// Allocate a secondary buffer per display.
    pub double_buffer: bool,
    /// Required buffer placement alignment in bytes; power of two.
    pub buffer_align: usize,
    /// Force whole-frame redraws instead of dirty-rectangle updates.
    pub full_refresh: bool,
    /// Allocator backing dynamic provisioning.
    pub memory: MemoryMode,
    /// Initialize the filesystem adapter during boot.
    pub filesystem: bool,
    /// GUI library log verbosity; `Off` skips the log bridge.
    pub log_level: LogVerbosity,
}

/// Configuration errors caught before any device is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardConfigError {
    /// A board must declare at least one panel.
    NoPanels,
    /// `vdb_percent` outside 1..=100.
    BadPercentage,
    /// `bits_per_pixel` is not one of the packable depths.
    BadBitsPerPixel,
    /// `buffer_align` is zero or not a power of two.
    BadAlignment,
    /// Pool memory mode configured with a zero budget.
    EmptyPool,
    /// More panels declared than the display registry can hold.
    TooManyPanels,
    /// Device list handed to materialization does not match the panel list.
    PanelCountMismatch,
}

impl core::fmt::Display for BoardConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoPanels => write!(f, "Board declares no panels"),
            Self::BadPercentage => write!(f, "Buffer percentage must be 1..=100"),
            Self::BadBitsPerPixel => write!(f, "Unsupported bits-per-pixel"),
            Self::BadAlignment => write!(f, "Buffer alignment must be a power of two"),
            Self::EmptyPool => write!(f, "Memory pool budget is zero"),
            Self::TooManyPanels => write!(f, "More panels than registry capacity"),
            Self::PanelCountMismatch => write!(f, "Panel and device counts differ"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardConfigError {}

impl BoardConfig {
    /// Validate the invariants the provisioning path relies on.
    pub fn validate(&self) -> Result<(), BoardConfigError> {
        if self.panels.is_empty() {
            return Err(BoardConfigError::NoPanels);
        }
        if self.vdb_percent == 0 || self.vdb_percent > 100 {
            return Err(BoardConfigError::BadPercentage);
        }
        if !matches!(self.bits_per_pixel, 1 | 16 | 24 | 32) {
            return Err(BoardConfigError::BadBitsPerPixel);
        }
        if !self.buffer_align.is_power_of_two() {
            return Err(BoardConfigError::BadAlignment);
        }
        if let MemoryMode::Pool { size: 0 } = self.memory {
            return Err(BoardConfigError::EmptyPool);
        }
        Ok(())
    }
}

/// Static-mode buffer size in bytes for one panel.
///
/// `bits_per_pixel * (vdb_percent * width * height / 100) / 8`, evaluated
/// in u64 so a 100% 32-bit full-HD panel cannot overflow. All inputs are
/// board constants, so this is usable in const contexts.
#[allow(clippy::arithmetic_side_effects)] // u64 intermediates; max product < 2^52
pub const fn static_buffer_bytes(
    bits_per_pixel: u8,
    vdb_percent: u8,
    width: u16,
    height: u16,
) -> usize {
    let pixels = (vdb_percent as u64 * width as u64 * height as u64) / 100;
    ((bits_per_pixel as u64 * pixels) / 8) as usize
}

/// Round `bytes` up to the next multiple of `align`.
///
/// `align` must be a power of two ([`BoardConfig::validate`] enforces
/// this). Static reservations are padded with this so consecutive
/// placements in the reservation region keep the configured alignment.
#[allow(clippy::arithmetic_side_effects)] // align validated power of two; board-constant sizes
pub const fn align_up(bytes: usize, align: usize) -> usize {
    (bytes + align - 1) & !(align - 1)
}

/// Pixel count backed by a static buffer of `bytes` at `bits_per_pixel`.
#[allow(clippy::arithmetic_side_effects)] // bits_per_pixel validated non-zero
pub const fn static_pixel_count(bytes: usize, bits_per_pixel: u8) -> u32 {
    ((bytes as u64 * 8) / bits_per_pixel as u64) as u32
}
