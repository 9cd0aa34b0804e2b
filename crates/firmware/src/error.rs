//! Boot-init error taxonomy
//!
//! Every failure of the display provisioning path is fatal to boot: the
//! orchestrator aborts on the first error and hands its [`InitError::code`]
//! to the boot sequencer, which treats any non-zero value as boot failure.
//! Nothing here is retried.

use platform::{BoardConfigError, DeviceClass, PixelFormat};

/// Which resolution axis violated the negotiated capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Horizontal (width).
    X,
    /// Vertical (height).
    Y,
}

/// A fatal display-init failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// A panel's driver reported not-ready when queried.
    DeviceNotReady,
    /// Configured resolution exceeds the negotiated maximum on one axis.
    UnsupportedResolution {
        /// Violating axis.
        axis: Axis,
        /// Configured extent on that axis.
        configured: u16,
        /// Negotiated maximum on that axis.
        max: u16,
    },
    /// The negotiated pixel format has no buffer-sizing rule.
    UnsupportedPixelFormat(PixelFormat),
    /// A buffer or descriptor allocation failed. Partial allocations from
    /// the same provisioning attempt have already been released.
    OutOfMemory,
    /// No render callback mapping exists for the panel's device class.
    UnsupportedDevice(DeviceClass),
    /// The rendering library rejected driver registration.
    RegistrationFailed,
    /// The dedicated memory pool could not be initialized.
    PoolInitFailed,
    /// The filesystem adapter failed to mount.
    FilesystemInitFailed,
    /// The input-device subsystem failed to initialize.
    InputInitFailed,
    /// The board configuration violated a static invariant.
    InvalidBoardConfig(BoardConfigError),
}

impl InitError {
    /// Non-zero code handed to the boot sequencer. Zero means success and
    /// is never produced here; each variant maps to a distinct value.
    pub const fn code(self) -> u8 {
        match self {
            Self::DeviceNotReady => 1,
            Self::UnsupportedResolution { .. } => 2,
            Self::UnsupportedPixelFormat(_) => 3,
            Self::OutOfMemory => 4,
            Self::UnsupportedDevice(_) => 5,
            Self::RegistrationFailed => 6,
            Self::PoolInitFailed => 7,
            Self::FilesystemInitFailed => 8,
            Self::InputInitFailed => 9,
            Self::InvalidBoardConfig(_) => 10,
        }
    }
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DeviceNotReady => write!(f, "Display device not ready"),
            Self::UnsupportedResolution {
                axis,
                configured,
                max,
            } => {
                let axis = match axis {
                    Axis::X => "width",
                    Axis::Y => "height",
                };
                write!(
                    f,
                    "Display not supported: {axis} {configured} exceeds maximum {max}"
                )
            }
            Self::UnsupportedPixelFormat(format) => {
                write!(f, "Unsupported pixel format: {format:?}")
            }
            Self::OutOfMemory => write!(f, "Failed to allocate rendering buffers"),
            Self::UnsupportedDevice(class) => {
                write!(f, "No render callback for device class {class:?}")
            }
            Self::RegistrationFailed => write!(f, "Failed to register display device"),
            Self::PoolInitFailed => write!(f, "Failed to initialize memory pool"),
            Self::FilesystemInitFailed => write!(f, "Failed to mount filesystem"),
            Self::InputInitFailed => write!(f, "Failed to initialize input devices"),
            Self::InvalidBoardConfig(err) => write!(f, "Invalid board configuration: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

impl From<BoardConfigError> for InitError {
    fn from(err: BoardConfigError) -> Self {
        Self::InvalidBoardConfig(err)
    }
}
