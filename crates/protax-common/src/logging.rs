//! Logging Configuration and Initialization
//!
//! Centralized logging setup for the protax binaries. Each run writes its
//! per-item events to a fixed-name log file that is truncated at startup, so
//! the log always describes the most recent run. A console layer carries only
//! the messages the user should see live (errors by default, everything in
//! verbose mode).
//!
//! Use the structured logging macros (`trace!`, `debug!`, `info!`, `warn!`,
//! `error!`) with fields rather than `println!`:
//!
//! ```rust
//! use tracing::{info, warn};
//!
//! info!(protein_id = %"P12345", "Processing identifier");
//! warn!(protein_id = %"BADID", "No data found for identifier");
//! ```

use crate::error::{ProtaxError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very detailed trace-level logging
    Trace,
    /// Debug-level logging for development
    Debug,
    /// Informational messages
    #[default]
    Info,
    /// Warning messages
    Warn,
    /// Error messages
    Error,
}

impl LogLevel {
    /// Convert to tracing Level
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ProtaxError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ProtaxError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level written to the log file
    pub level: LogLevel,

    /// Minimum level echoed to the console
    pub console_level: LogLevel,

    /// Log file path; truncated at the start of each run
    pub log_file: PathBuf,

    /// Additional filter directives (e.g., "hyper=warn,reqwest=debug")
    pub filter_directives: Option<String>,

    /// Whether to include target module names in log lines
    pub include_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console_level: LogLevel::Error,
            log_file: PathBuf::from("protax.log"),
            filter_directives: None,
            include_targets: true,
        }
    }
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay environment variables onto this configuration
    ///
    /// Environment variables:
    /// - `PROTAX_LOG_LEVEL`: file log level (trace, debug, info, warn, error)
    /// - `PROTAX_CONSOLE_LOG_LEVEL`: console log level
    /// - `PROTAX_LOG_FILTER`: additional filter directives
    /// - `PROTAX_LOG_INCLUDE_TARGETS`: include module targets (true/false)
    ///
    /// The log file path is fixed per binary and intentionally has no
    /// environment override.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("PROTAX_LOG_LEVEL") {
            self.level = level.parse()?;
        }

        if let Ok(level) = std::env::var("PROTAX_CONSOLE_LOG_LEVEL") {
            self.console_level = level.parse()?;
        }

        if let Ok(filter) = std::env::var("PROTAX_LOG_FILTER") {
            self.filter_directives = Some(filter);
        }

        if let Ok(val) = std::env::var("PROTAX_LOG_INCLUDE_TARGETS") {
            self.include_targets = val.parse().unwrap_or(true);
        }

        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> LogConfigBuilder {
        LogConfigBuilder::default()
    }
}

/// Builder for LogConfig
#[derive(Default)]
pub struct LogConfigBuilder {
    config: LogConfig,
}

impl LogConfigBuilder {
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn console_level(mut self, level: LogLevel) -> Self {
        self.config.console_level = level;
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = path.into();
        self
    }

    pub fn filter_directives(mut self, filter: impl Into<String>) -> Self {
        self.config.filter_directives = Some(filter.into());
        self
    }

    pub fn include_targets(mut self, include: bool) -> Self {
        self.config.include_targets = include;
        self
    }

    pub fn build(self) -> LogConfig {
        self.config
    }
}

/// Open the configured log file, discarding any previous run's contents
///
/// Parent directories are created as needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

/// Initialize logging with the given configuration
///
/// Installs the global tracing subscriber with a file layer (ANSI-free,
/// non-blocking) and a console layer. Should only be called once at
/// application startup.
///
/// The returned [`WorkerGuard`] must be kept alive for the duration of the
/// program; dropping it flushes any buffered log lines.
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let file = open_log_file(&config.log_file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let mut file_filter =
        EnvFilter::from_default_env().add_directive(config.level.to_tracing_level().into());

    if let Some(ref directives) = config.filter_directives {
        for directive in directives.split(',') {
            let directive = directive.trim().parse().map_err(|e| {
                ProtaxError::config(format!("Invalid log filter directive '{}': {}", directive, e))
            })?;
            file_filter = file_filter.add_directive(directive);
        }
    }

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(config.include_targets)
        .with_filter(file_filter);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_filter(LevelFilter::from_level(
            config.console_level.to_tracing_level(),
        ));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| ProtaxError::logging(e.to_string()))?;

    Ok(guard)
}
