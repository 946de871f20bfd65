//! Traydown Core - Foundation crate for the Traydown tray application.
//!
//! This crate holds everything that decides *what* to ask the OS shutdown
//! utility, independent of any GUI toolkit.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Menu enums (`Action`, `DelaySeconds`, `ActionSet`)
//! - [`selection`] - Radio-group selection state
//! - [`command`] - Selection to `shutdown` argument translation
//! - [`power`] - Idle/Pending state and tray feedback
//!
//! # Example
//!
//! ```rust
//! use traydown_core::{Action, DelaySeconds, ShutdownCommand};
//!
//! let cmd = ShutdownCommand::translate(Action::Shutdown, DelaySeconds::OneHour);
//! assert_eq!(cmd.to_string(), "/s /t 3600");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod command;
pub mod config;
pub mod error;
pub mod power;
pub mod selection;
pub mod types;

// Re-export commonly used types
pub use command::ShutdownCommand;
pub use config::{AppConfig, LauncherConfig, MenuConfig};
pub use error::{ConfigError, ConfigResult, LaunchError, Result, TraydownError};
pub use power::{PendingShutdown, PowerState, TrayFeedback, TrayIconKind};
pub use selection::{RadioGroup, SelectionState};
pub use types::{Action, ActionSet, DelaySeconds};
