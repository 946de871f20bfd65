pub mod controller;
pub mod launcher;
pub mod tray;

pub use controller::{Outcome, ShutdownController};
pub use launcher::{
    resolve_shutdown_binary, ConfiguredLauncher, DryRunLauncher, ProcessLauncher, SystemLauncher,
};
pub use tray::{check_states, dispatch, is_tray_supported, menu_definition, MenuCommand, MenuEntry};
