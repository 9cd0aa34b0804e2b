//! Display provisioning integration tests
//!
//! Exercises buffer sizing, the static/dynamic provisioning paths and the
//! atomicity of dynamic allocation from the firmware crate's perspective.
//!
//! Run with: cargo test -p firmware --test integration_display
// Test file: expect/unwrap and direct arithmetic are intentional here.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use firmware::boot::BootOrchestrator;
use firmware::display::provision::dynamic_pixel_count;
use firmware::error::InitError;
use firmware::fs::NullFilesystem;
use firmware::input::NullInput;
use platform::boards::TABULA_REV_B;
use platform::mocks::MockPanel;
use platform::{buffer_bytes, BoardConfig, DisplayDevice, MemoryMode, PixelFormat};

fn one_panel_board(memory: MemoryMode, double_buffer: bool) -> BoardConfig {
    let mut board = TABULA_REV_B;
    board.panels = &TABULA_REV_B.panels[..1];
    board.memory = memory;
    board.double_buffer = double_buffer;
    board
}

fn boot_one(board: BoardConfig, panel: MockPanel) -> BootOrchestrator {
    let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(panel)];
    BootOrchestrator::new(board, devices, Box::new(NullFilesystem), Box::new(NullInput))
}

// ─── Sizing arithmetic ───────────────────────────────────────────────────────

/// Byte sizing per pixel format, including the monochrome ceiling: 241
/// pixels pack into 31 bytes, not 30.
#[test]
fn test_buffer_bytes_per_format() {
    assert_eq!(buffer_bytes(PixelFormat::Argb8888, 100), Some(400));
    assert_eq!(buffer_bytes(PixelFormat::Rgb888, 100), Some(300));
    assert_eq!(buffer_bytes(PixelFormat::Rgb565, 100), Some(200));
    assert_eq!(buffer_bytes(PixelFormat::Mono01, 241), Some(31));
    assert_eq!(buffer_bytes(PixelFormat::Mono10, 241), Some(31));
    assert_eq!(buffer_bytes(PixelFormat::Rgb565, 57_600), Some(115_200));
    // Formats without a sizing rule
    assert_eq!(buffer_bytes(PixelFormat::Bgr565, 100), None);
    assert_eq!(buffer_bytes(PixelFormat::Gray4, 100), None);
}

/// The dynamic pixel count never drops below one scanline.
#[test]
fn test_dynamic_pixel_count_scanline_floor() {
    // 1% of 240×4 is 9 pixels; a scanline is 240.
    assert_eq!(dynamic_pixel_count(1, 240, 4), 240);
    // Above the floor the percentage applies exactly.
    assert_eq!(dynamic_pixel_count(1, 240, 240), 576);
    assert_eq!(dynamic_pixel_count(100, 240, 240), 57_600);
}

// ─── Dynamic provisioning through boot ───────────────────────────────────────

/// Double-buffering yields two same-size buffers behind one descriptor.
#[test]
fn test_double_buffer_boot() {
    let board = one_panel_board(MemoryMode::Heap, true);
    let mut boot = boot_one(board, MockPanel::st7789_240());
    boot.run().expect("double-buffered boot must succeed");

    let driver = boot
        .core()
        .registry()
        .iter()
        .next()
        .expect("one driver registered");
    assert!(driver.draw_buf().is_double());
    assert_eq!(driver.draw_buf().byte_len(), 115_200);

    let pool = boot.pool().expect("pool exists");
    assert!(pool.bytes_in_use() >= 230_400, "both frames stay charged");
}

/// Secondary-buffer exhaustion releases the primary: after the failed
/// boot nothing remains charged against the pool.
#[test]
fn test_double_buffer_failure_leaves_no_leak() {
    // Budget fits one 115 200-byte frame but not two.
    let board = one_panel_board(MemoryMode::Pool { size: 150_000 }, true);
    let mut boot = boot_one(board, MockPanel::st7789_240());

    let err = boot.run().expect_err("second frame must not fit");
    assert_eq!(err, InitError::OutOfMemory);

    let pool = boot.pool().expect("pool exists after pool init");
    assert_eq!(pool.bytes_in_use(), 0, "primary must have been released");
    assert_eq!(pool.allocations(), pool.frees());
}

/// A pixel format without a sizing rule fails before any allocation.
#[test]
fn test_unknown_format_fails_without_allocating() {
    let board = one_panel_board(MemoryMode::Pool { size: 512 * 1024 }, false);
    let panel = MockPanel::st7789_240().with_pixel_format(PixelFormat::Gray4);
    let mut boot = boot_one(board, panel);

    let err = boot.run().expect_err("sentinel format must fail");
    assert_eq!(err, InitError::UnsupportedPixelFormat(PixelFormat::Gray4));

    let pool = boot.pool().expect("pool exists after pool init");
    assert_eq!(pool.allocations(), 0, "no allocation may precede sizing");
    assert_eq!(pool.bytes_in_use(), 0);
}

// ─── Static-mode capability enforcement ──────────────────────────────────────

/// Configured extents exactly equal to the negotiated maxima succeed;
/// one pixel over on either axis aborts with `UnsupportedResolution`.
#[test]
fn test_static_capability_boundary() {
    use firmware::error::Axis;
    use platform::{Capabilities, DeviceClass};

    static PANEL_EXACT: [platform::PanelConfig; 1] = [platform::PanelConfig {
        name: "display_status",
        width: 128,
        height: 64,
        class: DeviceClass::Ssd1306,
    }];

    let mut board = platform::boards::TABULA_DEVKIT;
    board.panels = &PANEL_EXACT;

    // Exact fit
    let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(MockPanel::ssd1306_128x64())];
    let mut boot =
        BootOrchestrator::new(board, devices, Box::new(NullFilesystem), Box::new(NullInput));
    boot.run().expect("exact capability fit must succeed");

    // One pixel too wide
    let narrow = MockPanel::new(
        DeviceClass::Ssd1306,
        Capabilities {
            max_x_resolution: 127,
            max_y_resolution: 64,
            current_pixel_format: PixelFormat::Mono01,
        },
    );
    let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(narrow)];
    let mut boot =
        BootOrchestrator::new(board, devices, Box::new(NullFilesystem), Box::new(NullInput));
    let err = boot.run().expect_err("over-wide panel must fail");
    assert_eq!(
        err,
        InitError::UnsupportedResolution {
            axis: Axis::X,
            configured: 128,
            max: 127,
        }
    );
    assert_eq!(boot.core().registry().len(), 0);
}
