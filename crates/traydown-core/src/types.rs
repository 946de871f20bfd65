//! Shared types used across the Traydown application.
//!
//! The enums here are the typed values behind the tray menu's radio groups.

use crate::error::TraydownError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the shutdown utility should be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Power the machine off after the selected delay
    Shutdown,
    /// Restart the machine after the selected delay
    Restart,
    /// Cancel a pending shutdown or restart
    Abort,
}

impl Action {
    /// Every action, in menu order.
    pub const ALL: [Action; 3] = [Action::Shutdown, Action::Restart, Action::Abort];

    /// Human-readable menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Action::Shutdown => "Shutdown",
            Action::Restart => "Restart",
            Action::Abort => "Abort",
        }
    }

    /// Whether this action schedules something (as opposed to cancelling).
    #[must_use]
    pub fn is_scheduling(self) -> bool {
        !matches!(self, Action::Abort)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delay before the scheduled action fires.
///
/// `Now` is 10 seconds rather than 0 so a mistaken click can still be aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelaySeconds {
    /// 10 seconds
    Now,
    /// 1 hour
    OneHour,
    /// 2 hours
    TwoHours,
    /// 6 hours
    SixHours,
}

impl DelaySeconds {
    /// Every delay, in menu order.
    pub const ALL: [DelaySeconds; 4] = [
        DelaySeconds::Now,
        DelaySeconds::OneHour,
        DelaySeconds::TwoHours,
        DelaySeconds::SixHours,
    ];

    /// Delay in whole seconds, as passed to `shutdown /t`.
    #[must_use]
    pub fn seconds(self) -> u32 {
        match self {
            DelaySeconds::Now => 10,
            DelaySeconds::OneHour => 3_600,
            DelaySeconds::TwoHours => 7_200,
            DelaySeconds::SixHours => 21_600,
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DelaySeconds::Now => "Now",
            DelaySeconds::OneHour => "In 1 hour",
            DelaySeconds::TwoHours => "In 2 hours",
            DelaySeconds::SixHours => "In 6 hours",
        }
    }
}

impl fmt::Display for DelaySeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which actions the tray menu offers.
///
/// Some builds ship without Restart; both variants are kept selectable
/// through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSet {
    /// Shutdown, Restart and Abort
    #[default]
    Full,
    /// Shutdown and Abort only
    NoRestart,
}

impl ActionSet {
    /// Actions exposed by this set, in menu order.
    #[must_use]
    pub fn actions(self) -> Vec<Action> {
        match self {
            ActionSet::Full => Action::ALL.to_vec(),
            ActionSet::NoRestart => vec![Action::Shutdown, Action::Abort],
        }
    }

    /// Whether `action` is part of this set.
    #[must_use]
    pub fn contains(self, action: Action) -> bool {
        self.actions().contains(&action)
    }

    /// Configuration name of this set.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionSet::Full => "full",
            ActionSet::NoRestart => "no_restart",
        }
    }
}

impl FromStr for ActionSet {
    type Err = TraydownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ActionSet::Full),
            "no_restart" | "no-restart" => Ok(ActionSet::NoRestart),
            other => Err(TraydownError::Selection(format!(
                "unknown action set '{other}' (expected 'full' or 'no_restart')"
            ))),
        }
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
