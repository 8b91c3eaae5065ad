use std::io::Write;

use tracing::debug;

use super::{Builtin, CommandError};
use crate::core::state::SessionState;

#[derive(Clone, Default)]
pub struct ExportCommand;

impl ExportCommand {
    pub fn new() -> Self {
        Self
    }

    fn parse_export(args: &[String]) -> Option<(&str, &str)> {
        args.first()?.split_once('=')
    }
}

impl Builtin for ExportCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut SessionState,
        _out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        // Anything but NAME=VALUE is ignored.
        let Some((name, value)) = Self::parse_export(args) else {
            debug!(?args, "export: nothing to set");
            return Ok(());
        };

        if let Err(e) = state.env.set(name, value) {
            debug!(error = %e, "export: ignored");
        }
        Ok(())
    }
}
