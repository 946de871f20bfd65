//! Traydown Tauri Application Shell
//!
//! This is the thin application shell that owns the tray icon and routes
//! menu clicks. Core logic lives in the `crates/` directory.

mod state;
mod tray;

use tauri::{Manager, RunEvent};
use tracing::{info, warn};
use traydown_core::{AppConfig, ConfigResult};
use traydown_scheduler::is_tray_supported;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,traydown=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Load configuration, falling back to defaults when the file is unusable.
fn load_config() -> AppConfig {
    config_or_fail_safe(AppConfig::load_with_env())
}

/// An unreadable file may have been the one asking for a dry run, so the
/// fallback never launches anything.
fn config_or_fail_safe(loaded: ConfigResult<AppConfig>) -> AppConfig {
    match loaded {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "failed to load config, using defaults in dry run mode");
            let mut config = AppConfig::default();
            config.launcher.dry_run = true;
            config
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    info!("Starting Traydown v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config();
    if !is_tray_supported() {
        warn!("no system tray support detected; the icon may not be visible");
    }

    tauri::Builder::default()
        .setup(move |app| {
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            let controller = state::build_controller(&config)?;
            let context = tray::setup_tray(app.handle(), controller, config.menu.action_set)?;
            app.manage(context);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app, event| {
            // Tray-only: there are no windows whose closing should end the app.
            if let RunEvent::ExitRequested { code: None, api, .. } = event {
                api.prevent_exit();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use traydown_core::ConfigError;

    #[test]
    fn test_unreadable_config_falls_back_to_dry_run() {
        let err = ConfigError::InvalidValue {
            field: "menu.default_action".to_string(),
            reason: "restart is not in the no_restart set".to_string(),
        };

        let config = config_or_fail_safe(Err(err));

        assert!(config.launcher.dry_run);
        assert_eq!(config.menu, AppConfig::default().menu);
    }

    #[test]
    fn test_loaded_config_is_kept() {
        let mut loaded = AppConfig::default();
        loaded.launcher.dry_run = false;

        let config = config_or_fail_safe(Ok(loaded));

        assert!(!config.launcher.dry_run);
    }
}
