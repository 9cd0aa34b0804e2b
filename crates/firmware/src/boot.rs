//! Boot-init orchestrator
//!
//! Runs the whole display bring-up exactly once, strictly sequential, and
//! aborts on the first failure. Displays registered before the failure are
//! not rolled back; the board either reaches `Ready` or reports a fatal
//! code to the boot sequencer. The orchestrator owns the descriptor list,
//! the designated allocator and the library core, so no ambient global
//! state survives boot.

use alloc::boxed::Box;
use alloc::vec::Vec;

use gui::{GuiCore, Level, LogBridge, LogSink};
use platform::{BoardConfig, BoardConfigError, DisplayDevice, LogVerbosity, MemoryMode};

use crate::display::adapter::{adapt_and_register, CallbackTable, DEFAULT_CALLBACKS};
use crate::display::negotiate::negotiate;
use crate::display::provision::provision;
use crate::display::materialize;
use crate::error::InitError;
use crate::fs::FilesystemAdapter;
use crate::input::InputSubsystem;
use crate::memory::MemoryPool;

/// Largest pool budget the target can physically reserve.
pub const MAX_POOL_BYTES: usize = 8 * 1024 * 1024;

/// Where the single boot pass currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// `run` has not been called.
    NotStarted,
    /// Reserving the designated allocator.
    PoolInit,
    /// Wiring the log-severity bridge.
    LogBridgeInstalled,
    /// Initializing the library core.
    LibraryCoreInit,
    /// Mounting the filesystem (config-gated).
    FilesystemInit,
    /// Negotiate → provision → register, per display in declaration order.
    PerDisplayLoop,
    /// Initializing the input subsystem.
    InputInit,
    /// Boot-init completed; ownership of the buffers is with the library.
    Ready,
    /// Aborted; the originating error is retained for re-reporting.
    Failed(InitError),
}

/// The boot-init state machine.
pub struct BootOrchestrator {
    board: BoardConfig,
    state: InitState,
    devices: Option<Vec<Box<dyn DisplayDevice>>>,
    log_sink: Option<Box<dyn LogSink>>,
    fs: Box<dyn FilesystemAdapter>,
    input: Box<dyn InputSubsystem>,
    callbacks: CallbackTable,
    pool: Option<MemoryPool>,
    core: GuiCore,
}

impl BootOrchestrator {
    /// Orchestrator for `board`, pairing `devices` with the board's panels
    /// in declaration order.
    pub fn new(
        board: BoardConfig,
        devices: Vec<Box<dyn DisplayDevice>>,
        fs: Box<dyn FilesystemAdapter>,
        input: Box<dyn InputSubsystem>,
    ) -> Self {
        Self {
            board,
            state: InitState::NotStarted,
            devices: Some(devices),
            log_sink: None,
            fs,
            input,
            callbacks: DEFAULT_CALLBACKS,
            pool: None,
            core: GuiCore::new(),
        }
    }

    /// Install the host log sink the bridge forwards to. Ignored when the
    /// board's log level is `Off`.
    pub fn set_log_sink(&mut self, sink: Box<dyn LogSink>) {
        self.log_sink = Some(sink);
    }

    /// Override the render-callback table (bring-up builds).
    pub fn set_callbacks(&mut self, table: CallbackTable) {
        self.callbacks = table;
    }

    /// Current state.
    pub fn state(&self) -> InitState {
        self.state
    }

    /// The library core (registry access after boot).
    pub fn core(&self) -> &GuiCore {
        &self.core
    }

    /// Mutable core access for the render path.
    pub fn core_mut(&mut self) -> &mut GuiCore {
        &mut self.core
    }

    /// The designated allocator, once pool init has run.
    pub fn pool(&self) -> Option<&MemoryPool> {
        self.pool.as_ref()
    }

    /// Run the boot-init sequence.
    ///
    /// Idempotent on terminal states: a second call reports the recorded
    /// outcome without re-entering the sequence.
    pub fn run(&mut self) -> Result<(), InitError> {
        match self.state {
            InitState::Ready => return Ok(()),
            InitState::Failed(err) => return Err(err),
            _ => {}
        }
        match self.sequence() {
            Ok(()) => {
                self.state = InitState::Ready;
                self.core.diag(Level::Info, "Display init complete");
                Ok(())
            }
            Err(err) => {
                self.core.diag(Level::Error, diagnostic(err));
                self.state = InitState::Failed(err);
                Err(err)
            }
        }
    }

    fn sequence(&mut self) -> Result<(), InitError> {
        self.board.validate()?;

        self.state = InitState::PoolInit;
        let pool = match self.board.memory {
            MemoryMode::Pool { size } => {
                if size > MAX_POOL_BYTES {
                    return Err(InitError::PoolInitFailed);
                }
                MemoryPool::pooled(size)
            }
            MemoryMode::Heap => MemoryPool::heap(),
        };
        self.pool = Some(pool);

        self.state = InitState::LogBridgeInstalled;
        if self.board.log_level != LogVerbosity::Off {
            if let Some(sink) = self.log_sink.take() {
                self.core.install_log_bridge(LogBridge::new(sink));
            }
        }

        self.state = InitState::LibraryCoreInit;
        self.core.init();

        if self.board.filesystem {
            self.state = InitState::FilesystemInit;
            self.fs
                .mount()
                .map_err(|_| InitError::FilesystemInitFailed)?;
        }

        self.state = InitState::PerDisplayLoop;
        let board = self.board;
        let devices = self
            .devices
            .take()
            .ok_or(InitError::InvalidBoardConfig(
                BoardConfigError::PanelCountMismatch,
            ))?;
        let descriptors = {
            let pool = self.pool.as_mut().ok_or(InitError::PoolInitFailed)?;
            materialize(&board, devices, pool)?
        };
        for mut desc in descriptors {
            self.core.diag(Level::Trace, desc.config.name);
            desc.capability = Some(negotiate(desc.device.as_ref())?);
            let draw_buf = {
                let pool = self.pool.as_mut().ok_or(InitError::PoolInitFailed)?;
                provision(&mut desc, &board, pool)?
            };
            adapt_and_register(&mut self.core, desc, draw_buf, &board, self.callbacks)?;
        }

        self.state = InitState::InputInit;
        self.input.init().map_err(|_| InitError::InputInitFailed)?;
        Ok(())
    }
}

/// Exit code for the boot sequencer: zero on success, the error's code
/// otherwise.
pub fn exit_code(result: Result<(), InitError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}

/// One fixed diagnostic line per failure class, emitted before the error
/// propagates.
fn diagnostic(err: InitError) -> &'static str {
    match err {
        InitError::DeviceNotReady => "Display device not ready.",
        InitError::UnsupportedResolution { .. }
        | InitError::UnsupportedPixelFormat(_)
        | InitError::UnsupportedDevice(_) => "Display not supported.",
        InitError::OutOfMemory => "Failed to allocate rendering buffers.",
        InitError::RegistrationFailed => "Failed to register display device.",
        InitError::PoolInitFailed => "Failed to initialize memory pool.",
        InitError::FilesystemInitFailed => "Failed to mount filesystem.",
        InitError::InputInitFailed => "Failed to initialize input devices.",
        InitError::InvalidBoardConfig(_) => "Invalid board configuration.",
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use alloc::vec;
    use platform::boards::TABULA_REV_B;
    use platform::mocks::MockPanel;

    use crate::fs::NullFilesystem;
    use crate::input::NullInput;

    fn rev_b_orchestrator() -> BootOrchestrator {
        let devices: Vec<Box<dyn DisplayDevice>> = vec![
            Box::new(MockPanel::st7789_240()),
            Box::new(MockPanel::st7789_240()),
        ];
        BootOrchestrator::new(
            TABULA_REV_B,
            devices,
            Box::new(NullFilesystem),
            Box::new(NullInput),
        )
    }

    #[test]
    fn test_happy_path_reaches_ready() {
        let mut boot = rev_b_orchestrator();
        assert_eq!(boot.state(), InitState::NotStarted);
        boot.run().unwrap();
        assert_eq!(boot.state(), InitState::Ready);
        assert_eq!(boot.core().registry().len(), 2);
    }

    #[test]
    fn test_second_run_reports_terminal_state() {
        let mut boot = rev_b_orchestrator();
        boot.run().unwrap();
        // No re-entry: the registry does not grow.
        boot.run().unwrap();
        assert_eq!(boot.core().registry().len(), 2);
    }

    #[test]
    fn test_failure_is_sticky() {
        let devices: Vec<Box<dyn DisplayDevice>> =
            vec![Box::new(MockPanel::st7789_240().not_ready())];
        let mut board = TABULA_REV_B;
        board.panels = &TABULA_REV_B.panels[..1];
        let mut boot = BootOrchestrator::new(
            board,
            devices,
            Box::new(NullFilesystem),
            Box::new(NullInput),
        );
        assert_eq!(boot.run().unwrap_err(), InitError::DeviceNotReady);
        assert_eq!(boot.state(), InitState::Failed(InitError::DeviceNotReady));
        // Re-running reports the same outcome.
        assert_eq!(boot.run().unwrap_err(), InitError::DeviceNotReady);
    }

    #[test]
    fn test_oversized_pool_fails_pool_init() {
        let devices: Vec<Box<dyn DisplayDevice>> = vec![
            Box::new(MockPanel::st7789_240()),
            Box::new(MockPanel::st7789_240()),
        ];
        let mut board = TABULA_REV_B;
        board.memory = MemoryMode::Pool {
            size: MAX_POOL_BYTES + 1,
        };
        let mut boot = BootOrchestrator::new(
            board,
            devices,
            Box::new(NullFilesystem),
            Box::new(NullInput),
        );
        assert_eq!(boot.run().unwrap_err(), InitError::PoolInitFailed);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(Ok(())), 0);
        assert_eq!(exit_code(Err(InitError::DeviceNotReady)), 1);
        assert_eq!(exit_code(Err(InitError::InputInitFailed)), 9);
    }
}
