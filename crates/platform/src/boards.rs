//! Board definitions
//!
//! Declarative configuration for the supported Tabula hardware revisions,
//! one const per board. The firmware selects a board record at build time
//! and materializes its display descriptor list from it.

use crate::board::{BoardConfig, BufferMode, LogVerbosity, MemoryMode, PanelConfig};
use crate::device::DeviceClass;

/// Tabula rev B — the shipping two-panel board.
///
/// One 240×240 ST7789 square TFT per player (`display_white`,
/// `display_black`), RGB565. Buffers are provisioned dynamically from a
/// dedicated pool: two full-frame single buffers (2 × 115 200 bytes) plus
/// descriptors fit comfortably in the 512 KiB budget.
pub const TABULA_REV_B: BoardConfig = BoardConfig {
    name: "tabula_rev_b",
    panels: &[
        PanelConfig {
            name: "display_white",
            width: 240,
            height: 240,
            class: DeviceClass::St7789,
        },
        PanelConfig {
            name: "display_black",
            width: 240,
            height: 240,
            class: DeviceClass::St7789,
        },
    ],
    buffer_mode: BufferMode::Dynamic,
    bits_per_pixel: 16,
    vdb_percent: 100,
    double_buffer: false,
    buffer_align: 4,
    full_refresh: false,
    memory: MemoryMode::Pool { size: 512 * 1024 },
    filesystem: false,
    log_level: LogVerbosity::Info,
};

/// Tabula devkit — single-panel bring-up board.
///
/// One 128×64 SSD1306 monochrome OLED, statically reserved 1 bpp buffer.
/// The SSD1306 has no usable partial-update path, so full refresh is
/// forced. Verbose logging for bench work.
pub const TABULA_DEVKIT: BoardConfig = BoardConfig {
    name: "tabula_devkit",
    panels: &[PanelConfig {
        name: "display_status",
        width: 128,
        height: 64,
        class: DeviceClass::Ssd1306,
    }],
    buffer_mode: BufferMode::Static,
    bits_per_pixel: 1,
    vdb_percent: 100,
    double_buffer: false,
    buffer_align: 4,
    full_refresh: true,
    memory: MemoryMode::Heap,
    filesystem: false,
    log_level: LogVerbosity::Trace,
};

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use crate::board::static_buffer_bytes;

    #[test]
    fn test_shipping_board_is_valid() {
        assert!(TABULA_REV_B.validate().is_ok());
        assert_eq!(TABULA_REV_B.panels.len(), 2);
        assert_eq!(TABULA_REV_B.panels[0].name, "display_white");
        assert_eq!(TABULA_REV_B.panels[1].name, "display_black");
    }

    #[test]
    fn test_devkit_board_is_valid() {
        assert!(TABULA_DEVKIT.validate().is_ok());
        assert_eq!(TABULA_DEVKIT.buffer_mode, BufferMode::Static);
        // 128×64 at 1 bpp → 1 024-byte reservation
        let panel = &TABULA_DEVKIT.panels[0];
        assert_eq!(
            static_buffer_bytes(
                TABULA_DEVKIT.bits_per_pixel,
                TABULA_DEVKIT.vdb_percent,
                panel.width,
                panel.height
            ),
            1_024
        );
    }

    #[test]
    fn test_shipping_pool_fits_both_frames() {
        let MemoryMode::Pool { size } = TABULA_REV_B.memory else {
            panic!("rev B must use a dedicated pool");
        };
        // Two RGB565 full frames must fit with room for descriptors.
        assert!(size >= 2 * 115_200 + 1_024);
    }
}
