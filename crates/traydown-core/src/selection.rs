//! Radio-style selection state for the tray menu.

use crate::error::{Result, TraydownError};
use crate::types::{Action, ActionSet, DelaySeconds};
use std::fmt;
use tracing::debug;

/// A set of mutually exclusive options with exactly one selected member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioGroup<T> {
    members: Vec<T>,
    selected: usize,
}

impl<T: Copy + PartialEq + fmt::Display> RadioGroup<T> {
    /// Create a group over `members` with `initial` selected.
    ///
    /// # Errors
    /// Returns `TraydownError::Selection` if `initial` is not a member.
    pub fn new(members: Vec<T>, initial: T) -> Result<Self> {
        let selected = members
            .iter()
            .position(|m| *m == initial)
            .ok_or_else(|| not_a_member(initial))?;
        Ok(Self { members, selected })
    }

    /// Select `value`, deselecting every sibling.
    ///
    /// Returns `true` if the selection changed.
    ///
    /// # Errors
    /// Returns `TraydownError::Selection` if `value` is not a member; the
    /// current selection is left untouched.
    pub fn select(&mut self, value: T) -> Result<bool> {
        let index = self
            .members
            .iter()
            .position(|m| *m == value)
            .ok_or_else(|| not_a_member(value))?;
        let changed = index != self.selected;
        self.selected = index;
        Ok(changed)
    }

    /// The currently selected member.
    #[must_use]
    pub fn selected(&self) -> T {
        self.members[self.selected]
    }

    /// Whether `value` is the selected member.
    #[must_use]
    pub fn is_selected(&self, value: T) -> bool {
        self.selected() == value
    }

    /// Members in display order.
    #[must_use]
    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Each member paired with its check state, in display order.
    pub fn check_states(&self) -> impl Iterator<Item = (T, bool)> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(move |(i, m)| (*m, i == self.selected))
    }
}

fn not_a_member<T: fmt::Display>(value: T) -> TraydownError {
    TraydownError::Selection(format!("'{value}' is not offered in this menu"))
}

/// The user's current delay and action choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    delay: RadioGroup<DelaySeconds>,
    action: RadioGroup<Action>,
}

impl SelectionState {
    /// Build the selection for `action_set` with the given defaults.
    ///
    /// # Errors
    /// Returns `TraydownError::Selection` if `action` is not in `action_set`.
    pub fn new(action_set: ActionSet, delay: DelaySeconds, action: Action) -> Result<Self> {
        Ok(Self {
            delay: RadioGroup::new(DelaySeconds::ALL.to_vec(), delay)?,
            action: RadioGroup::new(action_set.actions(), action)?,
        })
    }

    /// Select a delay.
    pub fn select_delay(&mut self, delay: DelaySeconds) -> Result<bool> {
        let changed = self.delay.select(delay)?;
        debug!(delay_secs = delay.seconds(), changed, "delay selected");
        Ok(changed)
    }

    /// Select an action.
    pub fn select_action(&mut self, action: Action) -> Result<bool> {
        let changed = self.action.select(action)?;
        debug!(%action, changed, "action selected");
        Ok(changed)
    }

    /// Currently selected delay.
    #[must_use]
    pub fn delay(&self) -> DelaySeconds {
        self.delay.selected()
    }

    /// Currently selected action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action.selected()
    }

    /// The delay radio group.
    #[must_use]
    pub fn delay_group(&self) -> &RadioGroup<DelaySeconds> {
        &self.delay
    }

    /// The action radio group.
    #[must_use]
    pub fn action_group(&self) -> &RadioGroup<Action> {
        &self.action
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            delay: RadioGroup {
                members: DelaySeconds::ALL.to_vec(),
                selected: 0,
            },
            action: RadioGroup {
                members: Action::ALL.to_vec(),
                selected: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_delay_deselects_siblings() {
        let mut state = SelectionState::default();
        assert!(state.select_delay(DelaySeconds::TwoHours).unwrap());

        let checked: Vec<DelaySeconds> = state
            .delay_group()
            .check_states()
            .filter(|(_, checked)| *checked)
            .map(|(d, _)| d)
            .collect();
        assert_eq!(checked, vec![DelaySeconds::TwoHours]);
    }

    #[test]
    fn test_selecting_action_deselects_siblings() {
        let mut state = SelectionState::default();
        state.select_action(Action::Restart).unwrap();
        state.select_action(Action::Abort).unwrap();

        let checked = state
            .action_group()
            .check_states()
            .filter(|(_, checked)| *checked)
            .count();
        assert_eq!(checked, 1);
        assert!(state.action_group().is_selected(Action::Abort));
    }

    #[test]
    fn test_reselecting_reports_no_change() {
        let mut state = SelectionState::default();
        assert!(!state.select_delay(DelaySeconds::Now).unwrap());
    }

    #[test]
    fn test_groups_are_independent() {
        let mut state = SelectionState::default();
        state.select_delay(DelaySeconds::SixHours).unwrap();
        state.select_action(Action::Restart).unwrap();
        assert_eq!(state.delay(), DelaySeconds::SixHours);
        assert_eq!(state.action(), Action::Restart);
    }

    #[test]
    fn test_restart_rejected_without_restart() {
        let mut state =
            SelectionState::new(ActionSet::NoRestart, DelaySeconds::Now, Action::Shutdown)
                .unwrap();
        let err = state.select_action(Action::Restart).unwrap_err();
        assert!(matches!(err, TraydownError::Selection(_)));
        assert_eq!(state.action(), Action::Shutdown);
    }

    #[test]
    fn test_new_rejects_default_outside_set() {
        let result = SelectionState::new(ActionSet::NoRestart, DelaySeconds::Now, Action::Restart);
        assert!(result.is_err());
    }
}
