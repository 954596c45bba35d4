//! Structured logging setup.
//!
//! Library code only emits `tracing` events. Binaries that want to see them
//! call [`init_logging`] once at startup. `RUST_LOG`, when set, overrides the
//! configured level.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very detailed tracing.
    Trace,
    /// Per-route and per-operation detail.
    Debug,
    /// Summaries (document generated, table swapped).
    #[default]
    Info,
    /// Skipped or replaced procedures.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Lowercase name, as used in filter directives.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LoggingError::UnknownLevel(s.to_string())),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level for the procapi crates.
    pub level: LogLevel,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
    /// Extra filter directives, e.g. `hyper=warn`.
    pub directives: Vec<String>,
}

impl LogConfig {
    /// Default configuration (info, plain text).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level.
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Switch to JSON output.
    #[must_use]
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Add a filter directive.
    #[must_use]
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Filter string built from this configuration.
    #[must_use]
    pub fn filter_string(&self) -> String {
        let level = self.level;
        let mut parts = vec![
            format!("procapi={level}"),
            format!("procapi_core={level}"),
            format!("procapi_router={level}"),
            format!("procapi_openapi={level}"),
        ];
        parts.extend(self.directives.iter().cloned());
        parts.join(",")
    }
}

/// Logging setup failure.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Level name not recognised.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
    /// A filter directive did not parse.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Install a global `tracing` subscriber.
///
/// # Errors
///
/// Fails if a directive is malformed or a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.filter_string())?,
    };
    let json = config.json.then(|| tracing_subscriber::fmt::layer().json());
    let plain = (!config.json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .try_init()?;
    Ok(())
}
