use std::process::{Command, Stdio};

use tracing::debug;

use super::{ProcessError, Reaper, TerminationLog};
use crate::core::state::SessionState;
use crate::input::ParsedCommand;

/// Runs external programs. Foreground children are waited on here;
/// background children are handed to the reaper.
pub struct Launcher {
    log: TerminationLog,
    reaper: Reaper,
}

impl Launcher {
    pub fn new(log: TerminationLog) -> Result<Self, ProcessError> {
        let reaper = Reaper::start(log.clone())?;
        Ok(Launcher { log, reaper })
    }

    pub fn reaper(&self) -> &Reaper {
        &self.reaper
    }

    fn command(cmd: &ParsedCommand, state: &SessionState) -> Option<Command> {
        let (program, args) = cmd.argv().split_first()?;
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(state.env.iter());
        Some(command)
    }

    /// When exec is what failed, a child was created and already collected
    /// by the spawn itself; it still gets its termination record.
    fn spawn_failed(&self, program: &str, err: std::io::Error) -> ProcessError {
        let err = ProcessError::from_spawn(program, err);
        if matches!(err, ProcessError::Exec { .. }) {
            self.log.record();
        }
        err
    }

    /// Launch `cmd`, which must not be a builtin. An empty command is a no-op.
    pub fn launch(&self, cmd: &ParsedCommand, state: &SessionState) -> Result<(), ProcessError> {
        let Some(mut command) = Self::command(cmd, state) else {
            return Ok(());
        };

        if cmd.background() {
            // Register under the table lock so an early SIGCHLD cannot be
            // drained before the child is known.
            let mut table = self.reaper.table();
            let child = command
                .spawn()
                .map_err(|e| self.spawn_failed(cmd.name(), e))?;
            debug!(pid = child.id(), command = cmd.name(), "started background child");
            table.insert(child.id(), child);
            return Ok(());
        }

        let mut child = command
            .spawn()
            .map_err(|e| self.spawn_failed(cmd.name(), e))?;
        let pid = child.id();
        let status = child.wait().map_err(ProcessError::Wait)?;
        debug!(pid, %status, command = cmd.name(), "foreground child finished");
        self.log.record();
        Ok(())
    }
}
