use std::io::Write;

use super::{Builtin, CommandError};
use crate::core::state::SessionState;

#[derive(Clone, Default)]
pub struct EchoCommand;

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for EchoCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut SessionState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        writeln!(out, "{}", args.join(" "))?;
        out.flush()?;
        Ok(())
    }
}
