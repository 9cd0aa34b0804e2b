//! Driver adapter
//!
//! Final stage of the per-display pipeline: resolves the render callback
//! for the panel's controller class, assembles the library's driver record
//! and hands it to the registry. The callback mapping is a plain lookup
//! table so a new controller is one table row, not an adapter change.

use gui::{DisplayDriver, DrawBuffer, DriverHandle, GuiCore, RenderFn};
use platform::{BoardConfig, DeviceClass};

use crate::display::render;
use crate::display::DisplayDescriptor;
use crate::error::InitError;

/// Controller-class to render-callback mapping.
pub type CallbackTable = &'static [(DeviceClass, RenderFn)];

/// Callbacks for every controller the firmware ships a flush path for.
///
/// `SharpMemoryLcd` has no row yet; boards carrying one fail adaptation
/// with `UnsupportedDevice` until a callback lands.
pub const DEFAULT_CALLBACKS: CallbackTable = &[
    (DeviceClass::St7789, render::stream_rgb565),
    (DeviceClass::Gc9a01, render::stream_rgb565),
    (DeviceClass::Ssd1306, render::packed_mono),
];

/// Resolve the render callback for a controller class.
pub fn resolve_callback(table: CallbackTable, class: DeviceClass) -> Result<RenderFn, InitError> {
    table
        .iter()
        .find(|(key, _)| *key == class)
        .map(|(_, callback)| *callback)
        .ok_or(InitError::UnsupportedDevice(class))
}

/// Assemble and register one display's driver record.
///
/// Consumes the descriptor: device ownership passes into the record and
/// from there to the library. Registration rejection is fatal and is not
/// rolled back for displays registered earlier.
pub fn adapt_and_register(
    core: &mut GuiCore,
    desc: DisplayDescriptor,
    draw_buf: DrawBuffer,
    board: &BoardConfig,
    table: CallbackTable,
) -> Result<DriverHandle, InitError> {
    let callback = resolve_callback(table, desc.device.class())?;
    let driver = DisplayDriver::new(
        desc.hor_res,
        desc.ver_res,
        board.full_refresh,
        draw_buf,
        callback,
        desc.device,
    );
    core.register_driver(driver)
        .map_err(|_| InitError::RegistrationFailed)
}
