use std::io::Write;

use tracing::debug;

use crate::core::commands::Dispatch;
use crate::error::ShellError;
use crate::input::tokenize;

pub const EXIT_DIRECTIVE: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl<W: Write> CommandHandler for super::Shell<W> {
    /// The only place a line is dispatched. Builtins are always tried
    /// before anything is launched.
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError> {
        let cmd = match tokenize(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                self.report(&format!("mish: {}", e));
                return Ok(Flow::Continue);
            }
        };

        if cmd.is_empty() {
            return Ok(Flow::Continue);
        }
        if cmd.name() == EXIT_DIRECTIVE {
            debug!("exit requested");
            return Ok(Flow::Exit);
        }

        if self.builtins.dispatch(&cmd, &mut self.state, &mut self.out) == Dispatch::Handled {
            return Ok(Flow::Continue);
        }

        match self.launcher.launch(&cmd, &self.state) {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => self.report(&format!("mish: {}", e)),
        }
        Ok(Flow::Continue)
    }
}
