//! Application context, the single owner of the tray icon and selection.

use chrono::Local;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tauri::menu::CheckMenuItem;
use tauri::tray::TrayIcon;
use tauri::{AppHandle, Wry};
use tracing::{debug, info, warn};
use traydown_core::{AppConfig, TrayFeedback, TraydownError};
use traydown_scheduler::{
    check_states, resolve_shutdown_binary, ConfiguredLauncher, MenuCommand, Outcome,
    ShutdownController,
};

use crate::tray::{icon_image, TRAY_ID};

/// Controller type used by the running application.
pub type AppController = ShutdownController<ConfiguredLauncher>;

/// Built once during setup and managed by Tauri for the process lifetime.
pub struct AppContext {
    controller: Mutex<AppController>,
    /// `None` once torn down
    tray: Mutex<Option<TrayIcon<Wry>>>,
    /// Radio rows keyed by menu id
    checks: HashMap<&'static str, CheckMenuItem<Wry>>,
}

impl AppContext {
    pub fn new(
        controller: AppController,
        tray: TrayIcon<Wry>,
        checks: HashMap<&'static str, CheckMenuItem<Wry>>,
    ) -> Self {
        Self {
            controller: Mutex::new(controller),
            tray: Mutex::new(Some(tray)),
            checks,
        }
    }

    fn controller(&self) -> MutexGuard<'_, AppController> {
        // Menu events arrive one at a time on the UI thread.
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn tray(&self) -> MutexGuard<'_, Option<TrayIcon<Wry>>> {
        self.tray.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a menu command to the controller.
    pub fn execute(&self, command: MenuCommand) -> traydown_core::Result<Outcome> {
        self.controller().execute(command, Local::now())
    }

    /// Re-derive every check mark from the selection state.
    ///
    /// The toolkit toggles a check row on click; this puts the radio
    /// invariant back.
    pub fn sync_checks(&self) {
        let states = check_states(self.controller().selection());
        for (id, checked) in states {
            if let Some(item) = self.checks.get(id) {
                if let Err(err) = item.set_checked(checked) {
                    warn!(menu_id = id, error = %err, "failed to update check mark");
                }
            }
        }
    }

    /// Show the icon and tooltip for a state change.
    pub fn apply_feedback(&self, feedback: &TrayFeedback) {
        debug!(icon = ?feedback.icon, tooltip = %feedback.tooltip, "updating tray");
        match icon_image(feedback.icon) {
            Ok(icon) => {
                if let Some(tray) = self.tray().as_ref() {
                    if let Err(err) = tray.set_icon(Some(icon)) {
                        warn!(error = %err, "failed to set tray icon");
                    }
                }
            }
            Err(err) => warn!(error = %err, "failed to decode tray icon"),
        }
        self.set_tooltip(&feedback.tooltip);
    }

    /// Surface a failed command in the tooltip; the icon keeps showing the
    /// last known state.
    pub fn show_failure(&self, err: &TraydownError) {
        self.set_tooltip(&failure_tooltip(err));
    }

    fn set_tooltip(&self, text: &str) {
        if let Some(tray) = self.tray().as_ref() {
            if let Err(err) = tray.set_tooltip(Some(text)) {
                warn!(error = %err, "failed to set tray tooltip");
            }
        }
    }

    /// Release the tray icon before the process exits.
    ///
    /// Tauri's registry and this context each hold a handle; the icon only
    /// goes away when both are dropped, so both are hidden and dropped here.
    pub fn teardown(&self, app: &AppHandle) {
        let held = self.tray().take();
        let registered = app.remove_tray_by_id(TRAY_ID);
        if release_tray(held, registered) {
            info!("tray icon released");
        }
    }
}

/// A tray handle that can be hidden ahead of being dropped.
trait HideTray {
    fn hide(&self);
}

impl HideTray for TrayIcon<Wry> {
    fn hide(&self) {
        if let Err(err) = self.set_visible(false) {
            warn!(error = %err, "failed to hide tray icon");
        }
    }
}

/// Hide and drop every handle. Returns whether there was anything to release.
fn release_tray<T: HideTray>(held: Option<T>, registered: Option<T>) -> bool {
    let handles: Vec<T> = held.into_iter().chain(registered).collect();
    for handle in &handles {
        handle.hide();
    }
    !handles.is_empty()
}

/// Build the controller described by `config`.
pub fn build_controller(config: &AppConfig) -> anyhow::Result<AppController> {
    let selection = config.initial_selection()?;
    let program = resolve_shutdown_binary(&config.launcher);
    let launcher = ConfiguredLauncher::from_config(&config.launcher);

    if launcher.is_dry_run() {
        info!("dry run enabled: shutdown commands will only be logged");
    }
    info!(
        program = %program.display(),
        action_set = %config.menu.action_set,
        "shutdown controller ready"
    );

    Ok(ShutdownController::new(selection, program, launcher))
}

/// Tooltip shown after a command could not be issued.
pub fn failure_tooltip(err: &TraydownError) -> String {
    format!("Traydown - command failed: {err}")
}
