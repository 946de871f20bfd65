//! System tray construction and menu event handling.

use std::collections::HashMap;
use tauri::image::Image;
use tauri::menu::{CheckMenuItemBuilder, MenuBuilder, MenuEvent, MenuItemBuilder};
use tauri::tray::TrayIconBuilder;
use tauri::{AppHandle, Manager};
use tracing::{debug, error, info, warn};
use traydown_core::{ActionSet, TrayIconKind};
use traydown_scheduler::{check_states, dispatch, menu_definition, MenuEntry, Outcome};

use crate::state::{AppContext, AppController};

/// Id of the one tray icon this application owns.
pub const TRAY_ID: &str = "traydown";

const ICON_IDLE: &[u8] = include_bytes!("../icons/tray-idle.png");
const ICON_PENDING: &[u8] = include_bytes!("../icons/tray-pending.png");

/// PNG bytes for an icon kind.
pub fn icon_bytes(kind: TrayIconKind) -> &'static [u8] {
    match kind {
        TrayIconKind::Idle => ICON_IDLE,
        TrayIconKind::Pending => ICON_PENDING,
    }
}

/// Decode the tray icon for an icon kind.
pub fn icon_image(kind: TrayIconKind) -> tauri::Result<Image<'static>> {
    Image::from_bytes(icon_bytes(kind))
}

/// Build the tray icon and menu, returning the application context that
/// owns them.
pub fn setup_tray(
    app: &AppHandle,
    controller: AppController,
    action_set: ActionSet,
) -> anyhow::Result<AppContext> {
    let checked: HashMap<&str, bool> = check_states(controller.selection()).into_iter().collect();

    let mut checks = HashMap::new();
    let mut menu = MenuBuilder::new(app);
    for entry in menu_definition(action_set) {
        menu = match entry {
            MenuEntry::Title(text) => menu.item(
                &MenuItemBuilder::with_id("title", text)
                    .enabled(false)
                    .build(app)?,
            ),
            MenuEntry::Separator => menu.separator(),
            MenuEntry::Check { id, label } => {
                let item = CheckMenuItemBuilder::with_id(id, label)
                    .checked(checked.get(id).copied().unwrap_or(false))
                    .build(app)?;
                let menu = menu.item(&item);
                checks.insert(id, item);
                menu
            }
            MenuEntry::Item { id, label } => {
                menu.item(&MenuItemBuilder::with_id(id, label).build(app)?)
            }
        };
    }
    let menu = menu.build()?;

    let feedback = controller.feedback();
    let tray = TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon_image(feedback.icon)?)
        .tooltip(&feedback.tooltip)
        .menu(&menu)
        .show_menu_on_left_click(true)
        .on_menu_event(handle_menu_event)
        .build(app)?;

    info!(entries = checks.len(), "tray icon created");
    Ok(AppContext::new(controller, tray, checks))
}

/// Handle menu item clicks.
fn handle_menu_event(app: &AppHandle, event: MenuEvent) {
    let id = event.id().as_ref();
    let Some(command) = dispatch(id) else {
        debug!(menu_id = id, "ignoring menu event without a command");
        return;
    };
    let Some(context) = app.try_state::<AppContext>() else {
        warn!(menu_id = id, "menu event before application context was ready");
        return;
    };

    debug!(menu_id = id, ?command, "tray menu clicked");
    match context.execute(command) {
        Ok(Outcome::SelectionChanged | Outcome::Unchanged) => context.sync_checks(),
        Ok(Outcome::Issued(feedback)) => context.apply_feedback(&feedback),
        Ok(Outcome::ExitRequested) => {
            context.teardown(app);
            app.exit(0);
        }
        Err(err) => {
            error!(menu_id = id, error = %err, "tray command failed");
            context.sync_checks();
            context.show_failure(&err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_are_png() {
        for kind in [TrayIconKind::Idle, TrayIconKind::Pending] {
            assert!(icon_bytes(kind).starts_with(b"\x89PNG\r\n\x1a\n"));
        }
    }

    #[test]
    fn test_idle_and_pending_icons_differ() {
        assert_ne!(
            icon_bytes(TrayIconKind::Idle),
            icon_bytes(TrayIconKind::Pending)
        );
    }

    #[test]
    fn test_icons_decode() {
        let image = icon_image(TrayIconKind::Pending).expect("decode icon");
        assert_eq!(image.width(), 32);
        assert_eq!(image.height(), 32);
    }
}
