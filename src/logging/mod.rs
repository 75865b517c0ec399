//! Structured logging for the terminal
//!
//! Logs go to stderr so they never interleave with command output on
//! stdout. An optional daily-rolling file can be added next to it.
//!
//! ```rust,no_run
//! use gcterm::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::from_env()
//!     .with_debug(true)
//!     .with_format(LogFormat::Compact);
//! init_logging(&config);
//! ```

pub mod format;

use std::io;
use std::path::PathBuf;
use std::sync::{Once, OnceLock};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::TerminalError;

pub use format::{CompactFormatter, JsonFormatter, TerminalFormatter};

static INIT: Once = Once::new();

/// Keeps the non-blocking file writer alive for the whole process
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "gcterm.log";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `HH:MM:SS.mmm LEVEL target | message fields`
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// `[LEVEL] message`
    Compact,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        })
    }
}

impl std::str::FromStr for LogFormat {
    type Err = TerminalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(TerminalError::config(format!(
                "invalid log format '{}', expected text, json or compact",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level DEBUG
    pub debug: bool,
    /// Minimum level TRACE, wins over `debug`
    pub trace: bool,
    /// Also write to a daily file under `logging_dir`
    pub record_log: bool,
    /// Log directory; a leading `~/` is expanded
    pub logging_dir: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            trace: false,
            record_log: false,
            logging_dir: "~/.gcterm/logs".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Write logs under `dir` in addition to stderr
    pub fn with_logging_dir(mut self, dir: impl Into<String>) -> Self {
        self.logging_dir = dir.into();
        self.record_log = true;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Read `GCTERM_DEBUG`, `GCTERM_TRACE`, `GCTERM_LOG_FORMAT` and
    /// `GCTERM_LOG_DIR`. Unparseable formats are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.trace = std::env::var_os("GCTERM_TRACE").is_some();
        config.debug = config.trace || std::env::var_os("GCTERM_DEBUG").is_some();

        if let Some(format) = std::env::var("GCTERM_LOG_FORMAT")
            .ok()
            .and_then(|f| f.parse().ok())
        {
            config.format = format;
        }
        if let Ok(dir) = std::env::var("GCTERM_LOG_DIR") {
            config = config.with_logging_dir(dir);
        }
        config
    }

    /// Interactive sessions stay quiet unless asked otherwise
    fn level(&self) -> Level {
        if self.trace {
            Level::TRACE
        } else if self.debug {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }

    fn filter(&self) -> EnvFilter {
        if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!(
                "{},hyper=warn,hyper_util=warn,reqwest=warn,h2=warn",
                self.level()
            ))
        }
    }

    fn log_dir(&self) -> PathBuf {
        match self.logging_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.logging_dir)),
            None => PathBuf::from(&self.logging_dir),
        }
    }

    fn file_writer(&self) -> Option<tracing_appender::non_blocking::NonBlocking> {
        if !self.record_log {
            return None;
        }
        let dir = self.log_dir();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("warning: cannot create log directory {}: {}", dir.display(), e);
            return None;
        }
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX));
        let _ = FILE_GUARD.set(guard);
        Some(writer)
    }
}

/// Install the global subscriber. Only the first call has an effect.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| install(config));
}

fn install(config: &LoggingConfig) {
    let file = config.file_writer();

    let registry = tracing_subscriber::registry().with(config.filter());
    let result = match config.format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .event_format(TerminalFormatter)
                    .with_writer(io::stderr),
            )
            .with(file.map(|writer| {
                fmt::layer()
                    .event_format(TerminalFormatter)
                    .with_writer(writer)
                    .with_ansi(false)
            }))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().event_format(JsonFormatter).with_writer(io::stderr))
            .with(file.map(|writer| {
                fmt::layer()
                    .event_format(JsonFormatter)
                    .with_writer(writer)
                    .with_ansi(false)
            }))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .event_format(CompactFormatter)
                    .with_writer(io::stderr),
            )
            .with(file.map(|writer| {
                fmt::layer()
                    .event_format(CompactFormatter)
                    .with_writer(writer)
                    .with_ansi(false)
            }))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("warning: logging already initialised: {}", e);
    }
}

/// Whether [`init_logging`] has run
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.debug);
        assert!(!config.record_log);
        assert_eq!(config.logging_dir, "~/.gcterm/logs");
        assert_eq!(config.level(), Level::WARN);
    }

    #[test]
    fn test_levels() {
        assert_eq!(LoggingConfig::new().with_debug(true).level(), Level::DEBUG);
        assert_eq!(
            LoggingConfig::new().with_debug(true).with_trace(true).level(),
            Level::TRACE
        );
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_logging_dir_enables_file() {
        let config = LoggingConfig::new().with_logging_dir("/var/log/gcterm");
        assert!(config.record_log);
        assert_eq!(config.log_dir(), PathBuf::from("/var/log/gcterm"));
    }

    #[test]
    fn test_log_dir_expands_home() {
        let config = LoggingConfig::default();
        assert!(!config.log_dir().to_string_lossy().starts_with('~'));
    }
}
