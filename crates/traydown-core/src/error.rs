//! Core error types for the Traydown application.
//!
//! This module defines the central error type used across all subsystems.
//! Each subsystem error is represented as a variant for clear error propagation.

use std::path::PathBuf;
use thiserror::Error;

/// Central error type for all Traydown operations.
#[derive(Error, Debug)]
pub enum TraydownError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shutdown utility could not be launched
    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),

    /// A menu selection outside the enabled option set
    #[error("selection error: {0}")]
    Selection(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Failure to hand a command over to the operating system.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The process could not be spawned (missing binary, permission denied, ...)
    #[error("failed to launch {}: {source}", program.display())]
    Spawn {
        /// Program that was being launched
        program: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The utility ran but reported failure (e.g. nothing to abort)
    #[error("{} exited with {}", program.display(), describe_exit(*code))]
    Exit {
        /// Program that was launched
        program: PathBuf,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |code| format!("code {code}"))
}

/// Result type alias using `TraydownError`.
pub type Result<T> = std::result::Result<T, TraydownError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
