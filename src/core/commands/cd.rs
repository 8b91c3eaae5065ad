use std::env;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::{Builtin, CommandError};
use crate::core::state::SessionState;
use crate::path::PathExpander;

#[derive(Clone, Default)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }

    fn target(&self, args: &[String], state: &SessionState) -> Option<PathBuf> {
        match args.first() {
            None => state.home().map(PathBuf::from),
            Some(path) => self.path_expander.expand(path, state.home()),
        }
    }
}

impl Builtin for CdCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut SessionState,
        _out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let result = match self.target(args, state) {
            Some(path) => {
                debug!(path = %path.display(), "changing directory");
                env::set_current_dir(&path)
                    .map_err(|source| CommandError::ChangeDir { path, source })
            }
            None => {
                warn!("cd: HOME not set");
                Ok(())
            }
        };

        // The prompt must match the OS even when the change failed.
        state.refresh_cwd();
        result
    }
}
