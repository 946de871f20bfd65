//! Tray mode integration: declarative menu layout and event dispatch.
//!
//! The menu is described as a flat list of [`MenuEntry`] values; clicks come
//! back as string ids and are mapped to a [`MenuCommand`] through a static
//! table rather than by walking the toolkit's menu tree.

use traydown_core::{Action, ActionSet, DelaySeconds, SelectionState};

/// Returns true if tray support is available on the current platform.
///
/// On macOS and Windows this is always true.
/// On Linux, requires `libappindicator3` or `libayatana-appindicator`.
pub fn is_tray_supported() -> bool {
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("ldconfig")
            .arg("-p")
            .output()
            .map(|o| {
                let libs = String::from_utf8_lossy(&o.stdout);
                libs.contains("libappindicator3") || libs.contains("libayatana-appindicator3")
            })
            .unwrap_or(false)
    }
    #[cfg(not(target_os = "linux"))]
    {
        true
    }
}

/// Tray icon menu item IDs
pub const MENU_DELAY_NOW: &str = "delay_now";
pub const MENU_DELAY_ONE_HOUR: &str = "delay_one_hour";
pub const MENU_DELAY_TWO_HOURS: &str = "delay_two_hours";
pub const MENU_DELAY_SIX_HOURS: &str = "delay_six_hours";
pub const MENU_ACTION_SHUTDOWN: &str = "action_shutdown";
pub const MENU_ACTION_RESTART: &str = "action_restart";
pub const MENU_ACTION_ABORT: &str = "action_abort";
pub const MENU_EXECUTE: &str = "execute";
pub const MENU_EXIT: &str = "exit";

/// Title row shown at the top of the menu.
pub const MENU_TITLE: &str = "Traydown";

/// What a menu click asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Check a delay in the delay group
    SelectDelay(DelaySeconds),
    /// Check an action in the action group
    SelectAction(Action),
    /// Issue the command for the current selection
    Confirm,
    /// Release the tray icon and quit
    Exit,
}

const DISPATCH_TABLE: [(&str, MenuCommand); 9] = [
    (MENU_DELAY_NOW, MenuCommand::SelectDelay(DelaySeconds::Now)),
    (MENU_DELAY_ONE_HOUR, MenuCommand::SelectDelay(DelaySeconds::OneHour)),
    (MENU_DELAY_TWO_HOURS, MenuCommand::SelectDelay(DelaySeconds::TwoHours)),
    (MENU_DELAY_SIX_HOURS, MenuCommand::SelectDelay(DelaySeconds::SixHours)),
    (MENU_ACTION_SHUTDOWN, MenuCommand::SelectAction(Action::Shutdown)),
    (MENU_ACTION_RESTART, MenuCommand::SelectAction(Action::Restart)),
    (MENU_ACTION_ABORT, MenuCommand::SelectAction(Action::Abort)),
    (MENU_EXECUTE, MenuCommand::Confirm),
    (MENU_EXIT, MenuCommand::Exit),
];

/// Map a clicked menu id to its command. Unknown ids yield `None`.
#[must_use]
pub fn dispatch(id: &str) -> Option<MenuCommand> {
    DISPATCH_TABLE
        .iter()
        .find(|(entry_id, _)| *entry_id == id)
        .map(|(_, command)| *command)
}

/// The menu id that produces `command`.
#[must_use]
pub fn menu_id(command: MenuCommand) -> &'static str {
    match command {
        MenuCommand::SelectDelay(DelaySeconds::Now) => MENU_DELAY_NOW,
        MenuCommand::SelectDelay(DelaySeconds::OneHour) => MENU_DELAY_ONE_HOUR,
        MenuCommand::SelectDelay(DelaySeconds::TwoHours) => MENU_DELAY_TWO_HOURS,
        MenuCommand::SelectDelay(DelaySeconds::SixHours) => MENU_DELAY_SIX_HOURS,
        MenuCommand::SelectAction(Action::Shutdown) => MENU_ACTION_SHUTDOWN,
        MenuCommand::SelectAction(Action::Restart) => MENU_ACTION_RESTART,
        MenuCommand::SelectAction(Action::Abort) => MENU_ACTION_ABORT,
        MenuCommand::Confirm => MENU_EXECUTE,
        MenuCommand::Exit => MENU_EXIT,
    }
}

/// One row of the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Disabled caption
    Title(&'static str),
    /// Horizontal rule between groups
    Separator,
    /// Radio-check row
    Check {
        /// Stable id reported on click
        id: &'static str,
        /// Display text
        label: &'static str,
    },
    /// Plain clickable row
    Item {
        /// Stable id reported on click
        id: &'static str,
        /// Display text
        label: &'static str,
    },
}

/// Flat layout of the tray menu for `action_set`.
#[must_use]
pub fn menu_definition(action_set: ActionSet) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::Title(MENU_TITLE), MenuEntry::Separator];

    entries.extend(DelaySeconds::ALL.iter().map(|delay| MenuEntry::Check {
        id: menu_id(MenuCommand::SelectDelay(*delay)),
        label: delay.label(),
    }));
    entries.push(MenuEntry::Separator);

    entries.extend(action_set.actions().into_iter().map(|action| MenuEntry::Check {
        id: menu_id(MenuCommand::SelectAction(action)),
        label: action.label(),
    }));
    entries.push(MenuEntry::Separator);

    entries.push(MenuEntry::Item {
        id: MENU_EXECUTE,
        label: "Execute",
    });
    entries.push(MenuEntry::Item {
        id: MENU_EXIT,
        label: "Exit",
    });
    entries
}

/// Check mark for every radio row, derived from `selection`.
#[must_use]
pub fn check_states(selection: &SelectionState) -> Vec<(&'static str, bool)> {
    let delays = selection
        .delay_group()
        .check_states()
        .map(|(delay, checked)| (menu_id(MenuCommand::SelectDelay(delay)), checked));
    let actions = selection
        .action_group()
        .check_states()
        .map(|(action, checked)| (menu_id(MenuCommand::SelectAction(action)), checked));
    delays.chain(actions).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_supported_detection_does_not_panic() {
        let _ = is_tray_supported();
    }

    #[test]
    fn test_every_menu_id_dispatches_back() {
        for (id, command) in DISPATCH_TABLE {
            assert_eq!(dispatch(id), Some(command));
            assert_eq!(menu_id(command), id);
        }
    }

    #[test]
    fn test_every_command_has_its_own_id() {
        let commands = DelaySeconds::ALL
            .iter()
            .map(|delay| MenuCommand::SelectDelay(*delay))
            .chain(Action::ALL.iter().map(|action| MenuCommand::SelectAction(*action)))
            .chain([MenuCommand::Confirm, MenuCommand::Exit]);

        let mut seen = std::collections::HashSet::new();
        for command in commands {
            let id = menu_id(command);
            assert!(seen.insert(id), "{id} is shared by more than one command");
            assert_eq!(dispatch(id), Some(command));
        }
        assert_eq!(seen.len(), DISPATCH_TABLE.len());
    }

    #[test]
    fn test_unknown_id_dispatches_nothing() {
        assert_eq!(dispatch("settings"), None);
    }

    #[test]
    fn test_full_menu_layout() {
        let entries = menu_definition(ActionSet::Full);
        let ids: Vec<&str> = entries
            .iter()
            .filter_map(|entry| match entry {
                MenuEntry::Check { id, .. } | MenuEntry::Item { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(
            ids,
            vec![
                MENU_DELAY_NOW,
                MENU_DELAY_ONE_HOUR,
                MENU_DELAY_TWO_HOURS,
                MENU_DELAY_SIX_HOURS,
                MENU_ACTION_SHUTDOWN,
                MENU_ACTION_RESTART,
                MENU_ACTION_ABORT,
                MENU_EXECUTE,
                MENU_EXIT,
            ]
        );
        assert_eq!(entries[0], MenuEntry::Title(MENU_TITLE));
    }

    #[test]
    fn test_no_restart_menu_omits_restart() {
        let entries = menu_definition(ActionSet::NoRestart);
        assert!(!entries.iter().any(|entry| matches!(
            entry,
            MenuEntry::Check { id, .. } if *id == MENU_ACTION_RESTART
        )));
    }

    #[test]
    fn test_check_states_mark_one_per_group() {
        let mut selection = SelectionState::default();
        selection.select_delay(DelaySeconds::OneHour).unwrap();
        selection.select_action(Action::Restart).unwrap();

        let checked: Vec<&str> = check_states(&selection)
            .into_iter()
            .filter(|(_, checked)| *checked)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(checked, vec![MENU_DELAY_ONE_HOUR, MENU_ACTION_RESTART]);
    }
}
