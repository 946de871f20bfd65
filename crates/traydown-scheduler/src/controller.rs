//! Shutdown controller: selection, confirmation and Idle/Pending transitions.

use crate::launcher::ProcessLauncher;
use crate::tray::MenuCommand;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use traydown_core::{
    Action, DelaySeconds, PendingShutdown, PowerState, Result, SelectionState, ShutdownCommand,
    TrayFeedback,
};

/// What handling a menu command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A radio group changed; check marks need re-syncing
    SelectionChanged,
    /// The clicked option was already selected
    Unchanged,
    /// A command was issued; the tray should show this feedback
    Issued(TrayFeedback),
    /// The user asked to quit
    ExitRequested,
}

/// Owns the menu selection and the pending-shutdown state.
#[derive(Debug)]
pub struct ShutdownController<L> {
    selection: SelectionState,
    state: PowerState,
    program: PathBuf,
    launcher: L,
}

impl<L: ProcessLauncher> ShutdownController<L> {
    /// Create a controller that launches `program` through `launcher`.
    pub fn new(selection: SelectionState, program: impl Into<PathBuf>, launcher: L) -> Self {
        Self {
            selection,
            state: PowerState::Idle,
            program: program.into(),
            launcher,
        }
    }

    /// Check a delay.
    pub fn select_delay(&mut self, delay: DelaySeconds) -> Result<bool> {
        self.selection.select_delay(delay)
    }

    /// Check an action.
    pub fn select_action(&mut self, action: Action) -> Result<bool> {
        self.selection.select_action(action)
    }

    /// Issue the command for the current selection.
    ///
    /// On success the state moves to Pending (Shutdown/Restart) or Idle
    /// (Abort). If the launch fails the state is left as it was.
    ///
    /// # Errors
    /// Returns `TraydownError::Launch` if the shutdown utility cannot start.
    pub fn confirm(&mut self, now: DateTime<Local>) -> Result<TrayFeedback> {
        let action = self.selection.action();
        let delay = self.selection.delay();
        let command = ShutdownCommand::translate(action, delay);

        if let Err(err) = self.launcher.launch(&self.program, command.args()) {
            warn!(%command, error = %err, "shutdown command not issued");
            return Err(err.into());
        }

        if action.is_scheduling() {
            let pending = PendingShutdown::new(action, delay, now);
            info!(
                pending_id = %pending.id,
                %action,
                delay_secs = delay.seconds(),
                scheduled_at = %pending.scheduled_at,
                "shutdown scheduled"
            );
            self.state = PowerState::Pending(pending);
        } else {
            match self.state.pending() {
                Some(pending) => info!(pending_id = %pending.id, "pending shutdown aborted"),
                None => info!("abort issued with nothing pending"),
            }
            self.state = PowerState::Idle;
        }

        Ok(self.state.feedback())
    }

    /// Apply a dispatched menu command.
    pub fn execute(&mut self, command: MenuCommand, now: DateTime<Local>) -> Result<Outcome> {
        let changed = match command {
            MenuCommand::SelectDelay(delay) => self.select_delay(delay)?,
            MenuCommand::SelectAction(action) => self.select_action(action)?,
            MenuCommand::Confirm => return self.confirm(now).map(Outcome::Issued),
            MenuCommand::Exit => return Ok(Outcome::ExitRequested),
        };
        Ok(if changed {
            Outcome::SelectionChanged
        } else {
            Outcome::Unchanged
        })
    }

    /// Icon and tooltip for the current state.
    #[must_use]
    pub fn feedback(&self) -> TrayFeedback {
        self.state.feedback()
    }

    /// Current menu selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current power state.
    #[must_use]
    pub fn state(&self) -> &PowerState {
        &self.state
    }

    /// Path of the shutdown utility.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The launcher in use.
    #[must_use]
    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}
