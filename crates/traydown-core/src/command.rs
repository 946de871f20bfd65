//! Translation of a menu selection into `shutdown` arguments.

use crate::types::{Action, DelaySeconds};
use std::fmt;

/// Argument list for one invocation of the OS shutdown utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownCommand {
    action: Action,
    args: Vec<String>,
}

impl ShutdownCommand {
    /// Build the command for `action`. `delay` is ignored for [`Action::Abort`].
    #[must_use]
    pub fn translate(action: Action, delay: DelaySeconds) -> Self {
        let args = match action {
            Action::Shutdown => timed("/s", delay),
            Action::Restart => timed("/r", delay),
            Action::Abort => vec!["/a".to_string()],
        };
        Self { action, args }
    }

    /// The action this command performs.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Arguments in the order they are passed to the process.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn timed(flag: &str, delay: DelaySeconds) -> Vec<String> {
    vec![flag.to_string(), "/t".to_string(), delay.seconds().to_string()]
}

impl fmt::Display for ShutdownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduling_actions_carry_flag_and_delay() {
        for delay in DelaySeconds::ALL {
            for (action, flag) in [(Action::Shutdown, "/s"), (Action::Restart, "/r")] {
                let cmd = ShutdownCommand::translate(action, delay);
                assert!(cmd.args().iter().any(|a| a == flag));
                assert!(cmd.args().contains(&delay.seconds().to_string()));
            }
        }
    }

    #[test]
    fn test_abort_ignores_delay() {
        for delay in DelaySeconds::ALL {
            let cmd = ShutdownCommand::translate(Action::Abort, delay);
            assert_eq!(cmd.args(), ["/a"]);
        }
    }

    #[test]
    fn test_one_hour_shutdown() {
        let cmd = ShutdownCommand::translate(Action::Shutdown, DelaySeconds::OneHour);
        assert_eq!(cmd.to_string(), "/s /t 3600");
    }

    #[test]
    fn test_six_hour_restart() {
        let cmd = ShutdownCommand::translate(Action::Restart, DelaySeconds::SixHours);
        assert_eq!(cmd.to_string(), "/r /t 21600");
    }

    #[test]
    fn test_now_renders_ten() {
        let cmd = ShutdownCommand::translate(Action::Shutdown, DelaySeconds::Now);
        assert_eq!(cmd.args(), ["/s", "/t", "10"]);
    }
}
