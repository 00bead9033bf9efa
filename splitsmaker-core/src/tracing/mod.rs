//! Log subscriber setup and the span vocabulary of the codecs.
//!
//! Library code only emits events. A binary installs the subscriber once
//! with [`init_tracing`]; a second install is refused.

use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Config of the installed subscriber; set at most once
static INSTALLED: OnceLock<TracingConfig> = OnceLock::new();

/// Crates whose events pass the default filter
const DEFAULT_TARGETS: [&str; 2] = ["splitsmaker_core", "splitsmaker_cli"];

/// Subscriber installation failures
#[derive(Debug, Error)]
pub enum TracingError {
    /// Bad filter directives, or another global subscriber is present
    #[error("Cannot install log subscriber: {0}")]
    InitializationFailed(String),

    /// A subscriber from `init_tracing` is already active
    #[error("Logging is already set up for this process")]
    AlreadyInitialized,

    /// The log file could not be opened for writing
    #[error("Cannot open log file: {0}")]
    FileCreationFailed(String),
}

/// How much the SplitsMaker crates log. Warnings by default, so import
/// warnings surface without `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingLevel {
    /// `error`
    Error,
    /// `warn`
    #[default]
    Warn,
    /// `info`: one line per codec operation
    Info,
    /// `debug`
    Debug,
    /// `trace`: per-node validation events
    Trace,
}

impl TracingLevel {
    /// Maps a `-v` count onto a level, starting from `Warn`
    #[must_use]
    pub const fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Log destination. Stderr keeps stdout free for exported documents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard output
    Stdout,
    /// Standard error
    #[default]
    Stderr,
    /// A file, truncated on init, written without color codes
    File(PathBuf),
}

/// What [`init_tracing`] installs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TracingConfig {
    /// Level for the SplitsMaker crates
    pub level: TracingLevel,
    /// Destination
    pub output: TracingOutput,
    /// `EnvFilter` directives used instead of `level`
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Warnings to stderr
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level
    #[must_use]
    pub fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Replaces the per-crate level with raw directives, e.g.
    /// `splitsmaker_core::lss=trace`
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Builds the `EnvFilter` directive string for this configuration
    #[must_use]
    pub fn directives(&self) -> String {
        self.filter.clone().unwrap_or_else(|| {
            DEFAULT_TARGETS
                .iter()
                .map(|target| format!("{target}={}", self.level))
                .collect::<Vec<_>>()
                .join(",")
        })
    }
}

/// Installs the process-wide subscriber described by `config`.
///
/// # Errors
///
/// Returns `TracingError::AlreadyInitialized` if a subscriber was installed
/// before, `FileCreationFailed` if the log file cannot be opened and
/// `InitializationFailed` for bad directives.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    INSTALLED
        .set(config.clone())
        .map_err(|_| TracingError::AlreadyInitialized)?;

    let filter = EnvFilter::try_new(config.directives())
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    let (writer, ansi) = match &config.output {
        TracingOutput::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        TracingOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        TracingOutput::File(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            (BoxMakeWriter::new(std::sync::Mutex::new(file)), false)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(directives = %config.directives(), "Logging ready");
    Ok(())
}

/// The config [`init_tracing`] installed, if it ran
#[must_use]
pub fn installed_config() -> Option<&'static TracingConfig> {
    INSTALLED.get()
}

/// Info span around one codec call.
///
/// ```ignore
/// let _guard = trace_operation!(span_names::LSS_EXPORT, split_count = 3).entered();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Debug-level variant of [`trace_operation!`]
#[macro_export]
macro_rules! trace_operation_debug {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Span names used by the codecs
pub mod span_names {
    /// XML export
    pub const LSS_EXPORT: &str = "lss.export";
    /// XML import
    pub const LSS_IMPORT: &str = "lss.import";
    /// Share token encoding
    pub const SHARE_ENCODE: &str = "share.encode";
    /// Share token decoding
    pub const SHARE_DECODE: &str = "share.decode";
    /// Version migration
    pub const CONFIG_MIGRATE: &str = "config.migrate";
    /// Schema validation
    pub const CONFIG_VALIDATE: &str = "config.validate";
    /// Settings file load
    pub const SETTINGS_LOAD: &str = "settings.load";
}

/// Field names shared by spans and events
pub mod field_names {
    /// Top-level split count
    pub const SPLIT_COUNT: &str = "split_count";
    /// Warnings collected
    pub const WARNING_COUNT: &str = "warning_count";
    /// Length of a generated URL
    pub const URL_LENGTH: &str = "url_length";
    /// Whether icons were dropped to fit the budget
    pub const ICONS_STRIPPED: &str = "icons_stripped";
    /// Document or token format
    pub const FORMAT: &str = "format";
}
