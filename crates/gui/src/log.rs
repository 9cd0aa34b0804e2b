//! Log-severity bridge
//!
//! The GUI library reports diagnostics as single text lines prefixed with a
//! bracketed severity tag (`[Error]`, `[Warn]`, `[Info]`, `[Trace]`,
//! `[User]`). The bridge parses the tag once, strips it, and forwards the
//! remainder to the host's leveled log sink; `[User]` lines map to Info.
//!
//! The library boundary cannot be changed to carry a structured severity
//! field, so the single parse function below is the whole text-inspection
//! surface, kept small and tested.

use alloc::boxed::Box;

/// Severity tag embedded in a library log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// `[Error]`
    Error,
    /// `[Warn]`
    Warn,
    /// `[Info]`
    Info,
    /// `[Trace]`
    Trace,
    /// `[User]`: application-level output, forwarded at Info.
    User,
}

/// Host-side log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Failure that aborts or degrades operation.
    Error,
    /// Unexpected but recoverable condition.
    Warn,
    /// Normal operational message.
    Info,
    /// Per-operation detail.
    Trace,
}

impl Severity {
    /// The exact tag text, including brackets.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[Error]",
            Self::Warn => "[Warn]",
            Self::Info => "[Info]",
            Self::Trace => "[Trace]",
            Self::User => "[User]",
        }
    }

    /// Host level this severity forwards at.
    pub const fn host_level(self) -> Level {
        match self {
            Self::Error => Level::Error,
            Self::Warn => Level::Warn,
            Self::Info | Self::User => Level::Info,
            Self::Trace => Level::Trace,
        }
    }
}

/// Split a tagged line into its severity and the untagged remainder.
///
/// Returns `None` when the line carries no recognized tag. A single space
/// after the tag is consumed; further whitespace belongs to the message.
pub fn parse_tagged_line(line: &str) -> Option<(Severity, &str)> {
    const SEVERITIES: [Severity; 5] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Trace,
        Severity::User,
    ];
    for severity in SEVERITIES {
        if let Some(rest) = line.strip_prefix(severity.tag()) {
            return Some((severity, rest.strip_prefix(' ').unwrap_or(rest)));
        }
    }
    None
}

/// Leveled log sink on the host side of the bridge.
pub trait LogSink {
    /// Record one message at the given level.
    fn log(&mut self, level: Level, message: &str);
}

/// Bridge from tagged library lines to a leveled host sink.
pub struct LogBridge {
    sink: Box<dyn LogSink>,
}

impl LogBridge {
    /// Wrap a host sink.
    pub fn new(sink: Box<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Forward one raw library line.
    ///
    /// Lines without a recognized tag are forwarded unmodified at Info.
    /// The library is expected to always supply a tag, but a malformed
    /// line is not worth losing.
    pub fn forward(&mut self, raw_line: &str) {
        match parse_tagged_line(raw_line) {
            Some((severity, message)) => self.sink.log(severity.host_level(), message),
            None => self.sink.log(Level::Info, raw_line),
        }
    }

    /// Emit an already-leveled diagnostic from the firmware side.
    pub fn emit(&mut self, level: Level, message: &str) {
        self.sink.log(level, message);
    }
}

/// Sink that records every forwarded message; for tests and the emulator.
#[derive(Default)]
pub struct RecordingSink {
    /// Messages in arrival order.
    pub entries: alloc::vec::Vec<(Level, alloc::string::String)>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for RecordingSink {
    fn log(&mut self, level: Level, message: &str) {
        self.entries.push((level, alloc::string::String::from(message)));
    }
}

/// Sink that forwards to defmt on the embedded target.
#[cfg(feature = "defmt")]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
impl LogSink for DefmtSink {
    fn log(&mut self, level: Level, message: &str) {
        match level {
            Level::Error => defmt::error!("{=str}", message),
            Level::Warn => defmt::warn!("{=str}", message),
            Level::Info => defmt::info!("{=str}", message),
            Level::Trace => defmt::trace!("{=str}", message),
        }
    }
}
