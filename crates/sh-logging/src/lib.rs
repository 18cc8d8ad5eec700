// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized logging utilities for schoolhub
//!
//! This crate provides standardized `tracing` initialization so the CLI and
//! any other binary in the workspace log the same way: an `EnvFilter` that
//! honours `RUST_LOG`, plaintext or JSON output, and console or file sinks.

pub mod logging_config;

pub use logging_config::LoggingConfig;

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export clap for convenience when using CliLoggingArgs
pub use clap;

// Re-export Level for convenience
pub use tracing::Level;

/// Directory and file stem used for platform log paths
const APP_NAME: &str = "schoolhub";

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Plaintext => write!(f, "plaintext"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// CLI log level enum for clap integration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliLogLevel {
    /// Only error conditions
    Error,
    /// Errors and warnings
    #[default]
    Warn,
    /// Errors, warnings, and informational messages
    Info,
    /// All above plus debug information
    Debug,
    /// All above plus detailed tracing
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Standardized CLI logging arguments for clap integration
///
/// Use with `#[command(flatten)]`. Logs go to stderr unless `--log-file` or
/// `--log-dir` is given, so command output on stdout stays clean.
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliLoggingArgs {
    /// Log verbosity level
    #[arg(long, value_enum, global = true, help = "Log verbosity level (default: warn)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format
    #[arg(long, value_enum, global = true, help = "Log output format (default: plaintext)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    /// Directory for log files
    #[arg(long, global = true, help = "Directory for log files (default: platform specific)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Log filename
    #[arg(long, global = true, help = "Log filename")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Fill options not given on the command line from configuration
    pub fn with_fallback(mut self, config: &LoggingConfig) -> Self {
        self.log_level = self.log_level.or(config.log_level);
        self.log_format = self.log_format.or(config.log_format);
        self
    }

    /// Initialize logging based on the parsed CLI arguments
    ///
    /// # Examples
    /// ```rust,no_run
    /// use clap::Parser;
    /// use sh_logging::CliLoggingArgs;
    ///
    /// #[derive(Parser)]
    /// struct Args {
    ///     #[command(flatten)]
    ///     logging: CliLoggingArgs,
    /// }
    ///
    /// fn main() -> anyhow::Result<()> {
    ///     let args = Args::parse();
    ///     args.logging.init("schoolhub")?;
    ///     Ok(())
    /// }
    /// ```
    pub fn init(self, component: &str) -> anyhow::Result<()> {
        self.init_with_default_level(component, CliLogLevel::default())
    }

    pub fn init_with_default_level(
        self,
        component: &str,
        default_level: CliLogLevel,
    ) -> anyhow::Result<()> {
        let level = self.log_level.unwrap_or(default_level).into();
        let format = self.log_format.unwrap_or_default();

        if self.log_file.is_some() || self.log_dir.is_some() {
            let log_path = self.resolve_log_path(component);
            init_to_file(component, level, format, &log_path)
        } else {
            init(component, level, format)
        }
    }

    /// Resolve the complete log file path
    ///
    /// 1. An absolute `log_file` is used as is
    /// 2. A relative `log_file` is placed under `log_dir` when one is given
    /// 3. Without `log_file`, `<log_dir>/<component>.log` or the platform default
    fn resolve_log_path(&self, component: &str) -> PathBuf {
        match (&self.log_file, &self.log_dir) {
            (Some(file), _) if Path::new(file).is_absolute() => PathBuf::from(file),
            (Some(file), Some(dir)) => Path::new(dir).join(file),
            (Some(file), None) => PathBuf::from(file),
            (None, Some(dir)) => Path::new(dir).join(format!("{component}.log")),
            (None, None) => get_standard_log_path_for_component(component),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.log_level.is_none()
            && self.log_format.is_none()
            && self.log_dir.is_none()
            && self.log_file.is_none()
    }
}

/// Standard log file path with the component name as file stem
pub fn get_standard_log_path_for_component(component: &str) -> PathBuf {
    let base_path = get_standard_log_path();
    let parent = base_path.parent().unwrap_or(Path::new("/tmp"));
    parent.join(format!("{component}.log"))
}

/// Get the standard log file path for the current OS
///
/// - Windows: %APPDATA%\schoolhub\schoolhub.log
/// - macOS: ~/Library/Logs/schoolhub.log
/// - Linux: ~/.local/share/schoolhub/schoolhub.log
/// - Other: ~/schoolhub.log
pub fn get_standard_log_path() -> PathBuf {
    let file_name = format!("{APP_NAME}.log");

    #[cfg(target_os = "macos")]
    {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push("Library");
        path.push("Logs");
        path.push(file_name);
        path
    }

    #[cfg(any(target_os = "windows", target_os = "linux"))]
    {
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")));
        path.push(APP_NAME);
        path.push(file_name);
        path
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push(file_name);
        path
    }
}

/// Initialize console logging on stderr
///
/// # Example
/// ```rust,no_run
/// use sh_logging::{init, Level, LogFormat};
///
/// fn main() -> anyhow::Result<()> {
///     init("schoolhub", Level::INFO, LogFormat::Plaintext)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stderr)
}

/// Initialize logging appending to `log_path`, creating parent directories
pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &Path,
) -> anyhow::Result<()> {
    use std::fs;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;

    init_with_writer(component, default_level, format, log_file)
}

/// Initialize logging with a custom writer
///
/// `RUST_LOG` takes precedence over `default_level` when set.
pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(component, default_level)));

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer);
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}

/// Filter directive used when `RUST_LOG` is unset
///
/// Crate targets use underscores, so `sh-store` becomes `sh_store`.
fn default_directive(component: &str, level: Level) -> String {
    format!("{level},{}={level}", component.replace('-', "_"))
}

/// Redact sensitive information from log output
///
/// ```rust
/// use sh_logging::redact;
///
/// let token = "secret-bearer-token";
/// tracing::info!(token = %redact(token), "token configured");
/// ```
pub fn redact(_value: impl std::fmt::Display) -> &'static str {
    "[REDACTED]"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        assert_eq!(format!("{}", redact("sensitive-data")), "[REDACTED]");
    }

    #[test]
    fn test_cli_log_level_conversion() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_cli_log_level_display() {
        assert_eq!(CliLogLevel::Debug.to_string(), "debug");
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive("sh-store", Level::DEBUG),
            "DEBUG,sh_store=DEBUG"
        );
    }

    #[test]
    fn test_flags_win_over_config() {
        let config = LoggingConfig {
            log_level: Some(CliLogLevel::Debug),
            log_format: Some(LogFormat::Json),
        };
        let args = CliLoggingArgs {
            log_level: Some(CliLogLevel::Error),
            ..Default::default()
        }
        .with_fallback(&config);

        assert_eq!(args.log_level, Some(CliLogLevel::Error));
        assert_eq!(args.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_resolve_log_path() {
        let args = CliLoggingArgs {
            log_dir: Some("/var/log/schoolhub".to_string()),
            ..Default::default()
        };
        assert_eq!(
            args.resolve_log_path("schoolhub"),
            PathBuf::from("/var/log/schoolhub/schoolhub.log")
        );

        let args = CliLoggingArgs {
            log_dir: Some("/var/log".to_string()),
            log_file: Some("cli.log".to_string()),
            ..Default::default()
        };
        assert_eq!(args.resolve_log_path("schoolhub"), PathBuf::from("/var/log/cli.log"));

        let args = CliLoggingArgs {
            log_dir: Some("/var/log".to_string()),
            log_file: Some("/tmp/explicit.log".to_string()),
            ..Default::default()
        };
        assert_eq!(args.resolve_log_path("schoolhub"), PathBuf::from("/tmp/explicit.log"));
    }

    #[test]
    fn test_standard_log_path_for_component() {
        let path = get_standard_log_path_for_component("schoolhub-cli");
        assert!(path.to_string_lossy().ends_with("schoolhub-cli.log"));
    }

    #[test]
    fn test_init_to_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("schoolhub.log");

        // A global subscriber may already be set by another test; the file is
        // still created before registration is attempted.
        let _ = init_to_file("schoolhub", Level::INFO, LogFormat::Json, &path);
        assert!(path.exists());
    }
}
