//! Idle/Pending power state and the tray feedback derived from it.

use crate::types::{Action, DelaySeconds};
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format used for the scheduled time shown in the tooltip.
const TOOLTIP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tooltip shown while nothing is scheduled.
pub const IDLE_TOOLTIP: &str = "Traydown - no shutdown scheduled";

/// A shutdown or restart handed to the OS and not yet aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingShutdown {
    /// Correlates log lines for one scheduled command
    pub id: Uuid,
    /// Shutdown or Restart
    pub action: Action,
    /// Delay the command was issued with
    pub delay: DelaySeconds,
    /// Wall-clock time the OS countdown ends
    pub scheduled_at: DateTime<Local>,
}

impl PendingShutdown {
    /// Record a command issued at `now`.
    #[must_use]
    pub fn new(action: Action, delay: DelaySeconds, now: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            delay,
            scheduled_at: now + Duration::seconds(i64::from(delay.seconds())),
        }
    }

    /// Tooltip naming the absolute scheduled time.
    #[must_use]
    pub fn tooltip(&self) -> String {
        format!(
            "{} scheduled for {}",
            self.action.label(),
            self.scheduled_at.format(TOOLTIP_TIME_FORMAT)
        )
    }
}

/// Whether a shutdown is currently scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Nothing scheduled
    #[default]
    Idle,
    /// A shutdown or restart is counting down in the OS
    Pending(PendingShutdown),
}

impl PowerState {
    /// Whether a command is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, PowerState::Pending(_))
    }

    /// The pending command, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingShutdown> {
        match self {
            PowerState::Pending(pending) => Some(pending),
            PowerState::Idle => None,
        }
    }

    /// Icon and tooltip for this state.
    #[must_use]
    pub fn feedback(&self) -> TrayFeedback {
        match self {
            PowerState::Idle => TrayFeedback {
                icon: TrayIconKind::Idle,
                tooltip: IDLE_TOOLTIP.to_string(),
            },
            PowerState::Pending(pending) => TrayFeedback {
                icon: TrayIconKind::Pending,
                tooltip: pending.tooltip(),
            },
        }
    }
}

/// Which tray icon asset to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrayIconKind {
    /// No shutdown scheduled
    Idle,
    /// Shutdown or restart scheduled
    Pending,
}

/// What the tray should display after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayFeedback {
    /// Icon asset
    pub icon: TrayIconKind,
    /// Tooltip text
    pub tooltip: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_pending_adds_delay_to_now() {
        let pending = PendingShutdown::new(Action::Shutdown, DelaySeconds::TwoHours, noon());
        assert_eq!(
            pending.scheduled_at,
            Local.with_ymd_and_hms(2026, 10, 18, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_tooltip_names_absolute_time() {
        let pending = PendingShutdown::new(Action::Restart, DelaySeconds::OneHour, noon());
        assert_eq!(pending.tooltip(), "Restart scheduled for 2026-10-18 13:00:00");
    }

    #[test]
    fn test_idle_feedback() {
        let feedback = PowerState::Idle.feedback();
        assert_eq!(feedback.icon, TrayIconKind::Idle);
        assert_eq!(feedback.tooltip, IDLE_TOOLTIP);
    }

    #[test]
    fn test_pending_feedback_uses_pending_icon() {
        let state = PowerState::Pending(PendingShutdown::new(
            Action::Shutdown,
            DelaySeconds::Now,
            noon(),
        ));
        assert!(state.is_pending());
        let feedback = state.feedback();
        assert_eq!(feedback.icon, TrayIconKind::Pending);
        assert!(feedback.tooltip.ends_with("12:00:10"));
    }
}
