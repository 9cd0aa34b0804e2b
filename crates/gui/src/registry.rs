//! Display-driver registry
//!
//! Fixed-capacity, insertion-ordered registry the boot orchestrator
//! registers each assembled driver record into. Registration is rejected
//! when the capacity is exhausted or the library core has not been
//! initialized; the caller treats either as a fatal boot error.

use heapless::Vec;

use crate::driver::DisplayDriver;

/// Largest number of displays the library supports simultaneously.
pub const MAX_DISPLAYS: usize = 4;

/// Opaque handle identifying a registered display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverHandle(usize);

impl DriverHandle {
    /// Registration order index, 0-based.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Why a registration was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// `GuiCore::init` has not run yet.
    CoreNotInitialized,
    /// The registry already holds [`MAX_DISPLAYS`] drivers.
    CapacityExhausted,
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CoreNotInitialized => write!(f, "GUI core not initialized"),
            Self::CapacityExhausted => write!(f, "Display registry full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}

/// Insertion-ordered display registry.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: Vec<DisplayDriver, MAX_DISPLAYS>,
}

impl DriverRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            drivers: Vec::new(),
        }
    }

    /// Number of registered displays.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Whether no display has been registered.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Register a driver record, transferring ownership to the library.
    pub fn register(&mut self, driver: DisplayDriver) -> Result<DriverHandle, RegistryError> {
        let index = self.drivers.len();
        self.drivers
            .push(driver)
            .map_err(|_| RegistryError::CapacityExhausted)?;
        Ok(DriverHandle(index))
    }

    /// Registered driver by handle.
    pub fn get(&self, handle: DriverHandle) -> Option<&DisplayDriver> {
        self.drivers.get(handle.0)
    }

    /// Mutable access for the library's render path.
    pub fn get_mut(&mut self, handle: DriverHandle) -> Option<&mut DisplayDriver> {
        self.drivers.get_mut(handle.0)
    }

    /// Iterate drivers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DisplayDriver> {
        self.drivers.iter()
    }
}
