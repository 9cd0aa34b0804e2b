//! Input-subsystem seam
//!
//! The board's input devices (the reed-switch matrix and side buttons) are
//! initialized by their own subsystem; boot only needs the single entry
//! point. Failure is fatal, like every other boot-init error.

/// Input-subsystem initialization failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputError;

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Input subsystem initialization failed")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

/// Boot-time contract of the input subsystem.
pub trait InputSubsystem {
    /// Initialize all configured input devices. Called exactly once.
    fn init(&mut self) -> Result<(), InputError>;
}

/// Input subsystem that has nothing to initialize (emulator, bare devkit).
#[derive(Debug, Default)]
pub struct NullInput;

impl InputSubsystem for NullInput {
    fn init(&mut self) -> Result<(), InputError> {
        Ok(())
    }
}

/// Always-failing subsystem, for exercising the fatal path in host tests.
#[derive(Debug, Default)]
pub struct FailingInput;

impl InputSubsystem for FailingInput {
    fn init(&mut self) -> Result<(), InputError> {
        Err(InputError)
    }
}
