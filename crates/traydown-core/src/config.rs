//! Configuration management for Traydown.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::selection::SelectionState;
use crate::types::{Action, ActionSet, DelaySeconds};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/traydown/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tray menu contents and initial selection
    pub menu: MenuConfig,
    /// How the shutdown utility is located and launched
    pub launcher: LauncherConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    /// if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML or fail validation
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `TRAYDOWN_DRY_RUN`: Log commands instead of launching them (true/false)
    /// - `TRAYDOWN_ACTION_SET`: Override the offered actions (`full`/`no_restart`)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup, then re-validate.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("TRAYDOWN_DRY_RUN") {
            if let Ok(dry_run) = val.trim().parse() {
                self.launcher.dry_run = dry_run;
                tracing::debug!("Override launcher.dry_run from env: {}", dry_run);
            }
        }

        if let Some(val) = lookup("TRAYDOWN_ACTION_SET") {
            if let Ok(action_set) = val.parse::<ActionSet>() {
                self.menu.action_set = action_set;
                tracing::debug!("Override menu.action_set from env: {}", action_set);
            }
        }

        self.validate()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.menu.action_set.contains(self.menu.default_action) {
            return Err(ConfigError::InvalidValue {
                field: "menu.default_action".to_string(),
                reason: format!(
                    "'{}' is not offered by action set '{}'",
                    self.menu.default_action, self.menu.action_set
                ),
            });
        }
        Ok(())
    }

    /// Save configuration to the default location.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/traydown/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "traydown", "traydown").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Initial menu selection described by this configuration.
    pub fn initial_selection(&self) -> crate::Result<SelectionState> {
        SelectionState::new(
            self.menu.action_set,
            self.menu.default_delay,
            self.menu.default_action,
        )
    }
}

/// Tray menu settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Actions offered in the menu
    pub action_set: ActionSet,
    /// Delay checked at startup
    pub default_delay: DelaySeconds,
    /// Action checked at startup
    pub default_action: Action,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            action_set: ActionSet::Full,
            default_delay: DelaySeconds::Now,
            default_action: Action::Shutdown,
        }
    }
}

/// Shutdown utility launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Log the command instead of running it
    pub dry_run: bool,
    /// Explicit path to the shutdown binary
    pub shutdown_path: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            dry_run: default_dry_run(),
            shutdown_path: None,
        }
    }
}

/// Debug builds and non-Windows hosts never power off by default.
#[must_use]
pub fn default_dry_run() -> bool {
    cfg!(debug_assertions) || !cfg!(windows)
}
