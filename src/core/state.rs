use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::env::EnvVars;
use crate::error::ShellError;

/// Process-wide session data, owned by the shell loop and lent to the
/// builtins and the launcher.
#[derive(Debug, Clone)]
pub struct SessionState {
    current_dir: PathBuf,
    pub env: EnvVars,
}

impl SessionState {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            current_dir: env::current_dir().map_err(ShellError::CurrentDir)?,
            env: EnvVars::inherit(),
        })
    }

    pub fn with_env(env: EnvVars) -> Result<Self, ShellError> {
        Ok(Self {
            current_dir: env::current_dir().map_err(ShellError::CurrentDir)?,
            env,
        })
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Re-read the working directory from the OS. If that fails (e.g. the
    /// directory was removed underneath us) the last known value is kept.
    pub fn refresh_cwd(&mut self) {
        match env::current_dir() {
            Ok(dir) => self.current_dir = dir,
            Err(e) => warn!(error = %e, "getcwd() failed, keeping {}", self.current_dir.display()),
        }
    }

    pub fn home(&self) -> Option<&str> {
        self.env.get("HOME")
    }

    pub fn prompt(&self) -> String {
        format!("{}$ ", self.current_dir.display())
    }
}
