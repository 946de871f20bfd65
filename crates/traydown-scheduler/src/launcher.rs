//! Launching the OS shutdown utility.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};
use traydown_core::{LaunchError, LauncherConfig};

/// Hands a program and its arguments to the OS.
///
/// The shutdown utility only registers or cancels a timer with the OS, so
/// implementations wait for it to exit and report its status.
pub trait ProcessLauncher {
    /// Launch `program` with `args` and wait for it to exit.
    ///
    /// # Errors
    /// Returns `LaunchError::Spawn` if the OS refuses to start the process,
    /// and `LaunchError::Exit` if it exits unsuccessfully.
    fn launch(&self, program: &Path, args: &[String]) -> Result<(), LaunchError>;
}

/// Runs real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> Result<(), LaunchError> {
        let mut command = Command::new(program);
        command.args(args);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        // `status` waits for the child, so nothing is left unreaped.
        let status = command.status().map_err(|source| LaunchError::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

        if !status.success() {
            warn!(
                program = %program.display(),
                command = %args.join(" "),
                code = ?status.code(),
                "shutdown utility reported failure"
            );
            return Err(LaunchError::Exit {
                program: program.to_path_buf(),
                code: status.code(),
            });
        }

        info!(
            program = %program.display(),
            command = %args.join(" "),
            "shutdown utility finished"
        );
        Ok(())
    }
}

/// Logs commands instead of running them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunLauncher;

impl ProcessLauncher for DryRunLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> Result<(), LaunchError> {
        info!(
            program = %program.display(),
            command = %args.join(" "),
            "dry run: shutdown utility not launched"
        );
        Ok(())
    }
}

/// Either launcher, chosen from configuration at startup.
#[derive(Debug)]
pub enum ConfiguredLauncher {
    /// Real process launches
    System(SystemLauncher),
    /// Logged only
    DryRun(DryRunLauncher),
}

impl ConfiguredLauncher {
    /// Pick the launcher described by `config`.
    #[must_use]
    pub fn from_config(config: &LauncherConfig) -> Self {
        if config.dry_run {
            Self::DryRun(DryRunLauncher)
        } else {
            Self::System(SystemLauncher)
        }
    }

    /// Whether commands are only logged.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun(_))
    }
}

impl ProcessLauncher for ConfiguredLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> Result<(), LaunchError> {
        match self {
            Self::System(launcher) => launcher.launch(program, args),
            Self::DryRun(launcher) => launcher.launch(program, args),
        }
    }
}

/// Locate the shutdown binary.
///
/// Order: explicit override, `%SystemRoot%\System32\shutdown.exe`,
/// `%windir%\System32\shutdown.exe`, then bare `shutdown` on `PATH`.
#[must_use]
pub fn resolve_shutdown_binary(config: &LauncherConfig) -> PathBuf {
    resolve_with(config, |key| env::var_os(key).map(PathBuf::from))
}

fn resolve_with<F>(config: &LauncherConfig, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<PathBuf>,
{
    if let Some(path) = &config.shutdown_path {
        debug!(path = %path.display(), "using configured shutdown binary");
        return path.clone();
    }

    let resolved = ["SystemRoot", "windir"]
        .iter()
        .find_map(|key| lookup(key))
        .map(|root| root.join("System32").join("shutdown.exe"))
        .unwrap_or_else(|| PathBuf::from("shutdown"));
    debug!(path = %resolved.display(), "resolved shutdown binary");
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_path_wins() {
        let config = LauncherConfig {
            dry_run: true,
            shutdown_path: Some(PathBuf::from("/custom/shutdown")),
        };
        let path = resolve_with(&config, |_| Some(PathBuf::from("C:\\Windows")));
        assert_eq!(path, PathBuf::from("/custom/shutdown"));
    }

    #[test]
    fn test_system_root_preferred_over_windir() {
        let config = LauncherConfig {
            dry_run: true,
            shutdown_path: None,
        };
        let path = resolve_with(&config, |key| match key {
            "SystemRoot" => Some(PathBuf::from("root")),
            "windir" => Some(PathBuf::from("windir")),
            _ => None,
        });
        assert_eq!(
            path,
            PathBuf::from("root").join("System32").join("shutdown.exe")
        );
    }

    #[test]
    fn test_windir_fallback() {
        let config = LauncherConfig {
            dry_run: true,
            shutdown_path: None,
        };
        let path = resolve_with(&config, |key| {
            (key == "windir").then(|| PathBuf::from("win"))
        });
        assert_eq!(
            path,
            PathBuf::from("win").join("System32").join("shutdown.exe")
        );
    }

    #[test]
    fn test_path_fallback() {
        let config = LauncherConfig {
            dry_run: true,
            shutdown_path: None,
        };
        assert_eq!(resolve_with(&config, |_| None), PathBuf::from("shutdown"));
    }

    #[test]
    fn test_dry_run_never_touches_the_binary() {
        // A path that cannot exist still succeeds: nothing is spawned.
        DryRunLauncher
            .launch(
                Path::new("/nonexistent/traydown-test/shutdown"),
                &["/s".to_string(), "/t".to_string(), "10".to_string()],
            )
            .expect("dry run launch");
    }

    #[test]
    fn test_dry_run_keeps_no_history() {
        // Repeated confirms in a long-running session must not accumulate.
        assert_eq!(std::mem::size_of::<DryRunLauncher>(), 0);
        for _ in 0..1_000 {
            DryRunLauncher
                .launch(Path::new("shutdown"), &["/a".to_string()])
                .expect("dry run launch");
        }
    }

    #[test]
    fn test_from_config_picks_dry_run() {
        let config = LauncherConfig {
            dry_run: true,
            shutdown_path: None,
        };
        assert!(ConfiguredLauncher::from_config(&config).is_dry_run());

        let config = LauncherConfig {
            dry_run: false,
            shutdown_path: None,
        };
        assert!(!ConfiguredLauncher::from_config(&config).is_dry_run());
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let err = SystemLauncher
            .launch(
                Path::new("/nonexistent/traydown-test/shutdown"),
                &["/a".to_string()],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchError::Spawn { ref program, .. }
                if program == Path::new("/nonexistent/traydown-test/shutdown")
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_exit_is_ok() {
        SystemLauncher
            .launch(Path::new("true"), &[])
            .expect("`true` exits with status 0");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_exit_is_reported() {
        let err = SystemLauncher.launch(Path::new("false"), &[]).unwrap_err();
        assert!(matches!(
            err,
            LaunchError::Exit { ref program, code: Some(1) } if program == Path::new("false")
        ));
    }
}
