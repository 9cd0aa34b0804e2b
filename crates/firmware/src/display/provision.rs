//! Buffer provisioning
//!
//! Turns a negotiated descriptor into a ready draw-buffer descriptor, in
//! one of two mutually exclusive modes:
//!
//! - Static: buffers were reserved at materialization; this stage validates
//!   the configured extents against capability and wraps the reserved
//!   arrays. The first axis violation aborts before the descriptor is
//!   touched.
//! - Dynamic: extents come from capability; buffers are sized from the
//!   frame percentage (never below one scanline) and allocated here.
//!
//! Dynamic allocation is atomic with respect to failure: a later failure
//! releases every earlier allocation of the same attempt before
//! `OutOfMemory` is reported, verified through pool accounting.

use core::mem::size_of;

use gui::DrawBuffer;
use platform::{buffer_bytes, BoardConfig, BufferMode, Capabilities};

use crate::display::DisplayDescriptor;
use crate::error::{Axis, InitError};
use crate::memory::MemoryPool;

/// Provision one display's draw buffers.
///
/// Precondition: the negotiator has run (`desc.capability` is set).
pub fn provision(
    desc: &mut DisplayDescriptor,
    board: &BoardConfig,
    pool: &mut MemoryPool,
) -> Result<DrawBuffer, InitError> {
    let capability = desc.capability.ok_or(InitError::DeviceNotReady)?;
    match board.buffer_mode {
        BufferMode::Static => provision_static(desc, capability),
        BufferMode::Dynamic => provision_dynamic(desc, board, capability, pool),
    }
}

fn provision_static(
    desc: &mut DisplayDescriptor,
    capability: Capabilities,
) -> Result<DrawBuffer, InitError> {
    if desc.config.width > capability.max_x_resolution {
        return Err(InitError::UnsupportedResolution {
            axis: Axis::X,
            configured: desc.config.width,
            max: capability.max_x_resolution,
        });
    }
    if desc.config.height > capability.max_y_resolution {
        return Err(InitError::UnsupportedResolution {
            axis: Axis::Y,
            configured: desc.config.height,
            max: capability.max_y_resolution,
        });
    }
    // Reserved at materialization; absence is a provisioning-order bug and
    // surfaces as the allocation failure it effectively is.
    let primary = desc.primary.take().ok_or(InitError::OutOfMemory)?;
    let secondary = desc.secondary.take();
    Ok(DrawBuffer::init(primary, secondary, desc.pixel_count))
}

fn provision_dynamic(
    desc: &mut DisplayDescriptor,
    board: &BoardConfig,
    capability: Capabilities,
    pool: &mut MemoryPool,
) -> Result<DrawBuffer, InitError> {
    let hor = capability.max_x_resolution;
    let ver = capability.max_y_resolution;
    let pixel_count = dynamic_pixel_count(board.vdb_percent, hor, ver);

    // Sizing must precede allocation: an unknown format allocates nothing.
    let format = capability.current_pixel_format;
    let bytes =
        buffer_bytes(format, pixel_count).ok_or(InitError::UnsupportedPixelFormat(format))?;

    let primary = pool.alloc(bytes).map_err(|_| InitError::OutOfMemory)?;
    let secondary = if board.double_buffer {
        match pool.alloc(bytes) {
            Ok(buf) => Some(buf),
            Err(_) => {
                pool.release(primary);
                return Err(InitError::OutOfMemory);
            }
        }
    } else {
        None
    };

    // The draw-buffer descriptor object itself is charged against the same
    // allocator; its failure unwinds both data buffers.
    if pool.reserve(size_of::<DrawBuffer>()).is_err() {
        if let Some(buf) = secondary {
            pool.release(buf);
        }
        pool.release(primary);
        return Err(InitError::OutOfMemory);
    }

    desc.hor_res = hor;
    desc.ver_res = ver;
    desc.buffer_bytes = bytes;
    desc.pixel_count = pixel_count;
    Ok(DrawBuffer::init(primary, secondary, pixel_count))
}

/// Pixels each dynamic buffer covers: the configured percentage of a full
/// frame, floored at one scanline.
#[allow(clippy::arithmetic_side_effects)] // u64 intermediates; product of two u16 extents
#[allow(clippy::cast_possible_truncation)] // percent*hor*ver/100 <= u16::MAX^2 < u32::MAX
pub fn dynamic_pixel_count(vdb_percent: u8, hor_res: u16, ver_res: u16) -> u32 {
    let frame_share = (vdb_percent as u64 * hor_res as u64 * ver_res as u64) / 100;
    let count = frame_share.max(hor_res as u64);
    count as u32
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec::Vec;
    use platform::boards::{TABULA_DEVKIT, TABULA_REV_B};
    use platform::mocks::MockPanel;
    use platform::{DisplayDevice, PixelFormat};

    use crate::display::materialize;

    fn dynamic_descriptor(
        board: &BoardConfig,
        panel: MockPanel,
        pool: &mut MemoryPool,
    ) -> DisplayDescriptor {
        let devices: Vec<Box<dyn DisplayDevice>> = alloc::vec![Box::new(panel)];
        let mut board_one = *board;
        board_one.panels = &board.panels[..1];
        let mut descs = materialize(&board_one, devices, pool).unwrap();
        let mut desc = descs.pop().unwrap();
        desc.capability = Some(desc.device.capabilities());
        desc
    }

    #[test]
    fn test_scanline_floor() {
        // 1% of 240×240 is 576 pixels, above the floor
        assert_eq!(dynamic_pixel_count(1, 240, 240), 576);
        // 1% of a 240×4 strip is 9 pixels; the scanline floor wins
        assert_eq!(dynamic_pixel_count(1, 240, 4), 240);
        assert_eq!(dynamic_pixel_count(100, 240, 240), 57_600);
    }

    #[test]
    fn test_dynamic_full_frame_rgb565() {
        let mut pool = MemoryPool::heap();
        let mut desc = dynamic_descriptor(&TABULA_REV_B, MockPanel::st7789_240(), &mut pool);
        let buf = provision(&mut desc, &TABULA_REV_B, &mut pool).unwrap();
        assert_eq!(buf.byte_len(), 115_200);
        assert_eq!(buf.pixel_count(), 57_600);
        assert!(!buf.is_double());
        assert_eq!(desc.hor_res, 240);
        assert_eq!(desc.ver_res, 240);
        assert_eq!(desc.buffer_bytes, 115_200);
    }

    #[test]
    fn test_unknown_format_allocates_nothing() {
        let mut pool = MemoryPool::heap();
        let panel = MockPanel::st7789_240().with_pixel_format(PixelFormat::Gray4);
        let mut desc = dynamic_descriptor(&TABULA_REV_B, panel, &mut pool);
        let err = provision(&mut desc, &TABULA_REV_B, &mut pool).unwrap_err();
        assert_eq!(err, InitError::UnsupportedPixelFormat(PixelFormat::Gray4));
        assert_eq!(pool.allocations(), 0);
        assert_eq!(pool.bytes_in_use(), 0);
    }

    #[test]
    fn test_secondary_failure_releases_primary() {
        let mut board = TABULA_REV_B;
        board.double_buffer = true;
        // One 115 200-byte frame fits; the second does not.
        board.memory = platform::MemoryMode::Pool { size: 150_000 };
        let mut pool = MemoryPool::from_mode(board.memory);
        let mut desc = dynamic_descriptor(&board, MockPanel::st7789_240(), &mut pool);
        let err = provision(&mut desc, &board, &mut pool).unwrap_err();
        assert_eq!(err, InitError::OutOfMemory);
        // The primary was released: nothing remains charged.
        assert_eq!(pool.bytes_in_use(), 0);
        assert_eq!(pool.frees(), 1);
    }

    #[test]
    fn test_descriptor_charge_failure_releases_both() {
        let mut board = TABULA_REV_B;
        board.double_buffer = true;
        // Both frames fit exactly; the descriptor charge cannot.
        board.memory = platform::MemoryMode::Pool { size: 230_400 };
        let mut pool = MemoryPool::from_mode(board.memory);
        let mut desc = dynamic_descriptor(&board, MockPanel::st7789_240(), &mut pool);
        let err = provision(&mut desc, &board, &mut pool).unwrap_err();
        assert_eq!(err, InitError::OutOfMemory);
        assert_eq!(pool.bytes_in_use(), 0);
        assert_eq!(pool.frees(), 2);
    }

    #[test]
    fn test_static_exact_capability_fit_succeeds() {
        let mut pool = MemoryPool::heap();
        let devices: Vec<Box<dyn DisplayDevice>> =
            alloc::vec![Box::new(MockPanel::ssd1306_128x64())];
        let mut descs = materialize(&TABULA_DEVKIT, devices, &mut pool).unwrap();
        let mut desc = descs.pop().unwrap();
        desc.capability = Some(desc.device.capabilities());
        let buf = provision(&mut desc, &TABULA_DEVKIT, &mut pool).unwrap();
        assert_eq!(buf.pixel_count(), 8_192);
        assert_eq!(buf.byte_len(), 1_024);
    }

    #[test]
    fn test_static_width_past_capability_aborts() {
        let mut pool = MemoryPool::heap();
        let devices: Vec<Box<dyn DisplayDevice>> =
            alloc::vec![Box::new(MockPanel::ssd1306_128x64())];
        let mut descs = materialize(&TABULA_DEVKIT, devices, &mut pool).unwrap();
        let mut desc = descs.pop().unwrap();
        // Capability one pixel narrower than configured.
        desc.capability = Some(Capabilities {
            max_x_resolution: 127,
            max_y_resolution: 64,
            current_pixel_format: PixelFormat::Mono01,
        });
        let err = provision(&mut desc, &TABULA_DEVKIT, &mut pool).unwrap_err();
        assert_eq!(
            err,
            InitError::UnsupportedResolution {
                axis: Axis::X,
                configured: 128,
                max: 127,
            }
        );
        // The reserved buffer was not consumed.
        assert!(desc.primary.is_some());
    }
}
