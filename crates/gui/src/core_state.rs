//! Library core state
//!
//! Init-once core the boot orchestrator drives: the log bridge, the global
//! init flag, and the display registry. The whole struct is owned by the
//! orchestrator rather than living in ambient statics, which keeps host
//! tests independent of each other.

use crate::driver::DisplayDriver;
use crate::log::{Level, LogBridge};
use crate::registry::{DriverHandle, DriverRegistry, RegistryError};

/// The GUI library's init-once core state.
#[derive(Default)]
pub struct GuiCore {
    initialized: bool,
    registry: DriverRegistry,
    log: Option<LogBridge>,
}

impl GuiCore {
    /// Uninitialized core with an empty registry and no log bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the log bridge. Must happen before [`GuiCore::init`] so the
    /// library's own init diagnostics reach the host sink.
    pub fn install_log_bridge(&mut self, bridge: LogBridge) {
        self.log = Some(bridge);
    }

    /// Whether a log bridge has been installed.
    pub fn has_log_bridge(&self) -> bool {
        self.log.is_some()
    }

    /// Initialize the library core. Idempotent.
    pub fn init(&mut self) {
        if self.initialized {
            self.diag(Level::Warn, "GUI core already initialized");
            return;
        }
        self.initialized = true;
        self.diag(Level::Trace, "GUI core initialized");
    }

    /// Whether [`GuiCore::init`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Register a display driver with the initialized core.
    pub fn register_driver(
        &mut self,
        driver: DisplayDriver,
    ) -> Result<DriverHandle, RegistryError> {
        if !self.initialized {
            return Err(RegistryError::CoreNotInitialized);
        }
        self.registry.register(driver)
    }

    /// The display registry.
    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Mutable registry access for the render path.
    pub fn registry_mut(&mut self) -> &mut DriverRegistry {
        &mut self.registry
    }

    /// Forward a raw severity-tagged library line through the bridge.
    ///
    /// Dropped silently when no bridge is installed; the library must keep
    /// working without one.
    pub fn emit_log(&mut self, raw_line: &str) {
        if let Some(bridge) = self.log.as_mut() {
            bridge.forward(raw_line);
        }
    }

    /// Emit an already-leveled diagnostic from the firmware side.
    pub fn diag(&mut self, level: Level, message: &str) {
        if let Some(bridge) = self.log.as_mut() {
            bridge.emit(level, message);
        }
    }
}
