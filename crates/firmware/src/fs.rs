//! Filesystem seam
//!
//! Boards with external flash mount a filesystem for piece-set assets and
//! saved games. Boot only drives the single mount entry point, gated by
//! the board's `filesystem` flag.

/// Filesystem mount failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FsError;

impl core::fmt::Display for FsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Filesystem mount failed")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FsError {}

/// Boot-time contract of the filesystem adapter.
pub trait FilesystemAdapter {
    /// Mount the configured filesystem. Called at most once.
    fn mount(&mut self) -> Result<(), FsError>;
}

/// Adapter for boards without storage; mounting succeeds trivially.
#[derive(Debug, Default)]
pub struct NullFilesystem;

impl FilesystemAdapter for NullFilesystem {
    fn mount(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}

/// Always-failing adapter, for exercising the fatal path in host tests.
#[derive(Debug, Default)]
pub struct FailingFilesystem;

impl FilesystemAdapter for FailingFilesystem {
    fn mount(&mut self) -> Result<(), FsError> {
        Err(FsError)
    }
}
