//! Per-display provisioning pipeline
//!
//! One descriptor per panel, created at registry materialization and
//! written once per field during the single boot pass:
//!
//! negotiate → provision → adapt-and-register
//!
//! The descriptor carries everything the later stages need so the
//! orchestrator never reaches back into the board configuration mid-loop.

pub mod adapter;
pub mod negotiate;
pub mod provision;
pub mod render;

use alloc::boxed::Box;
use alloc::vec::Vec;

use gui::MAX_DISPLAYS;
use platform::{
    align_up, static_buffer_bytes, static_pixel_count, BoardConfig, BoardConfigError, BufferMode,
    Capabilities, DisplayDevice, PanelConfig,
};

use crate::error::InitError;
use crate::memory::MemoryPool;

/// One panel's init-time state.
///
/// Capability and buffer fields start empty and are written once by the
/// negotiator and provisioner; the adapter then consumes the descriptor.
pub struct DisplayDescriptor {
    /// The panel's driver instance. Ownership passes to the driver record
    /// at registration.
    pub device: Box<dyn DisplayDevice>,
    /// Configured panel metadata, immutable.
    pub config: PanelConfig,
    /// Capability snapshot, set once by the negotiator.
    pub capability: Option<Capabilities>,
    /// Resolution the buffers are sized for. In static mode the configured
    /// width/height; in dynamic mode the negotiated maxima.
    pub hor_res: u16,
    /// See `hor_res`.
    pub ver_res: u16,
    /// Per-buffer size in bytes. Zero until provisioning runs (static mode
    /// fills it at materialization).
    pub buffer_bytes: usize,
    /// Pixels each buffer holds. Zero until sized.
    pub pixel_count: u32,
    /// Pre-reserved primary buffer (static mode only until provisioning).
    pub primary: Option<Box<[u8]>>,
    /// Pre-reserved secondary buffer, when double-buffering is configured.
    pub secondary: Option<Box<[u8]>>,
}

// The device handle is an opaque trait object; everything else is worth
// seeing in assertion failures.
impl core::fmt::Debug for DisplayDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisplayDescriptor")
            .field("config", &self.config)
            .field("capability", &self.capability)
            .field("hor_res", &self.hor_res)
            .field("ver_res", &self.ver_res)
            .field("buffer_bytes", &self.buffer_bytes)
            .field("pixel_count", &self.pixel_count)
            .finish_non_exhaustive()
    }
}

impl DisplayDescriptor {
    fn new(device: Box<dyn DisplayDevice>, config: PanelConfig) -> Self {
        Self {
            device,
            config,
            capability: None,
            hor_res: 0,
            ver_res: 0,
            buffer_bytes: 0,
            pixel_count: 0,
            primary: None,
            secondary: None,
        }
    }
}

/// Materialize the board's ordered descriptor list.
///
/// Validates the configuration, pairs each panel with its device in
/// declaration order and, in static buffer mode, reserves each panel's
/// fixed-size buffers from the designated allocator up front. Dynamic
/// mode defers all sizing to provisioning.
pub fn materialize(
    board: &BoardConfig,
    devices: Vec<Box<dyn DisplayDevice>>,
    pool: &mut MemoryPool,
) -> Result<Vec<DisplayDescriptor>, InitError> {
    board.validate()?;
    if board.panels.len() > MAX_DISPLAYS {
        return Err(InitError::InvalidBoardConfig(BoardConfigError::TooManyPanels));
    }
    if devices.len() != board.panels.len() {
        return Err(InitError::InvalidBoardConfig(
            BoardConfigError::PanelCountMismatch,
        ));
    }

    let mut descriptors = Vec::with_capacity(board.panels.len());
    for (device, panel) in devices.into_iter().zip(board.panels.iter()) {
        let mut desc = DisplayDescriptor::new(device, *panel);
        if board.buffer_mode == BufferMode::Static {
            reserve_static(&mut desc, board, pool)?;
        }
        descriptors.push(desc);
    }
    Ok(descriptors)
}

/// Reserve one panel's static buffers from board constants.
///
/// Sizing never depends on accumulated state: it is a pure function of
/// bits-per-pixel, the frame percentage and the configured extents.
fn reserve_static(
    desc: &mut DisplayDescriptor,
    board: &BoardConfig,
    pool: &mut MemoryPool,
) -> Result<(), InitError> {
    let bytes = static_buffer_bytes(
        board.bits_per_pixel,
        board.vdb_percent,
        desc.config.width,
        desc.config.height,
    );
    // Reservations are padded to the configured alignment so consecutive
    // placements in the region all start on an aligned boundary. The
    // padding is slack, not pixels: the pixel count comes from the
    // unpadded size.
    let reserved = align_up(bytes, board.buffer_align);
    let primary = pool.alloc(reserved).map_err(|_| InitError::OutOfMemory)?;
    let secondary = if board.double_buffer {
        match pool.alloc(reserved) {
            Ok(buf) => Some(buf),
            Err(_) => {
                pool.release(primary);
                return Err(InitError::OutOfMemory);
            }
        }
    } else {
        None
    };

    desc.hor_res = desc.config.width;
    desc.ver_res = desc.config.height;
    desc.buffer_bytes = reserved;
    desc.pixel_count = static_pixel_count(bytes, board.bits_per_pixel);
    desc.primary = Some(primary);
    desc.secondary = secondary;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use alloc::vec;
    use platform::boards::{TABULA_DEVKIT, TABULA_REV_B};
    use platform::mocks::MockPanel;

    fn rev_b_devices() -> Vec<Box<dyn DisplayDevice>> {
        vec![
            Box::new(MockPanel::st7789_240()),
            Box::new(MockPanel::st7789_240()),
        ]
    }

    #[test]
    fn test_dynamic_board_materializes_unsized() {
        let mut pool = MemoryPool::heap();
        let descs = materialize(&TABULA_REV_B, rev_b_devices(), &mut pool).unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[0].config.name, "display_white");
        assert_eq!(descs[1].config.name, "display_black");
        assert_eq!(descs[0].buffer_bytes, 0);
        assert!(descs[0].primary.is_none());
        assert_eq!(pool.bytes_in_use(), 0);
    }

    #[test]
    fn test_static_board_reserves_up_front() {
        let mut pool = MemoryPool::heap();
        let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(MockPanel::ssd1306_128x64())];
        let descs = materialize(&TABULA_DEVKIT, devices, &mut pool).unwrap();
        // 1 bpp, 100%, 128×64 → 1 024 bytes, 8 192 pixels
        assert_eq!(descs[0].buffer_bytes, 1_024);
        assert_eq!(descs[0].pixel_count, 8_192);
        assert_eq!(descs[0].hor_res, 128);
        assert_eq!(descs[0].ver_res, 64);
        assert!(descs[0].primary.is_some());
        assert!(descs[0].secondary.is_none());
        assert_eq!(pool.bytes_in_use(), 1_024);
    }

    #[test]
    fn test_static_reservation_padded_to_alignment() {
        use platform::DeviceClass;

        static PANELS: [PanelConfig; 1] = [PanelConfig {
            name: "display_wide",
            width: 130,
            height: 64,
            class: DeviceClass::Ssd1306,
        }];
        let mut board = TABULA_DEVKIT;
        board.panels = &PANELS;
        board.buffer_align = 64;

        // 130×64 at 1 bpp is 1 040 bytes; the reservation pads to the
        // next 64-byte boundary while the pixel count stays unpadded.
        let mut pool = MemoryPool::heap();
        let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(MockPanel::ssd1306_128x64())];
        let descs = materialize(&board, devices, &mut pool).unwrap();
        assert_eq!(descs[0].buffer_bytes, 1_088);
        assert_eq!(descs[0].pixel_count, 8_320);
        assert_eq!(pool.bytes_in_use(), 1_088);
    }

    #[test]
    fn test_descriptor_debug_omits_device_handle() {
        // Materialization results appear in assertion failures; the
        // descriptor must be Debug without requiring it of the device.
        let mut pool = MemoryPool::heap();
        let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(MockPanel::ssd1306_128x64())];
        let descs = materialize(&TABULA_DEVKIT, devices, &mut pool).unwrap();
        let rendered = format!("{:?}", descs[0]);
        assert!(rendered.contains("display_status"));
        assert!(rendered.contains("buffer_bytes: 1024"));
        assert!(rendered.ends_with(".. }"));
    }

    #[test]
    fn test_device_count_mismatch_rejected() {
        let mut pool = MemoryPool::heap();
        let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(MockPanel::st7789_240())];
        let err = materialize(&TABULA_REV_B, devices, &mut pool).unwrap_err();
        assert_eq!(
            err,
            InitError::InvalidBoardConfig(BoardConfigError::PanelCountMismatch)
        );
    }

    #[test]
    fn test_static_reservation_failure_is_atomic() {
        let mut board = TABULA_DEVKIT;
        board.double_buffer = true;
        // Budget fits the primary but not the secondary.
        let mut pool = MemoryPool::pooled(1_500);
        let devices: Vec<Box<dyn DisplayDevice>> = vec![Box::new(MockPanel::ssd1306_128x64())];
        let err = materialize(&board, devices, &mut pool).unwrap_err();
        assert_eq!(err, InitError::OutOfMemory);
        assert_eq!(pool.bytes_in_use(), 0);
    }
}
