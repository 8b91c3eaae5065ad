use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing::warn;

use crate::error::ShellError;

pub const TERMINATION_MESSAGE: &str = "Child process was terminated";

/// Append-only record of collected children, shared between the launcher
/// and the reaper thread.
#[derive(Clone, Debug)]
pub struct TerminationLog {
    file_path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl TerminationLog {
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, ShellError> {
        let file_path = file_path.into();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&file_path)
            .map_err(|source| ShellError::LogFile {
                path: file_path.clone(),
                source,
            })?;

        Ok(Self {
            file_path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Append one termination line. Write failures are logged, not raised:
    /// this runs on the reaper thread where nobody could handle them.
    pub fn record(&self) {
        // A poisoned lock only means another writer panicked mid-line.
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(file, "{}", TERMINATION_MESSAGE).and_then(|_| file.flush()) {
            warn!(path = %self.file_path.display(), error = %e, "failed to append to termination log");
        }
    }
}
