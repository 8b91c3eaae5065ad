use thiserror::Error;

pub mod executor;
pub mod reaper;
pub mod termination_log;

pub use executor::Launcher;
pub use reaper::Reaper;
pub use termination_log::TerminationLog;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// No new process could be created at all. Fatal to the session.
    #[error("fork() failed: {0}")]
    Spawn(#[source] std::io::Error),
    /// The process was created but the program image could not be loaded.
    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("waitpid() failed: {0}")]
    Wait(#[source] std::io::Error),
    #[error("Signal error: {0}")]
    Signal(#[source] std::io::Error),
}

impl ProcessError {
    /// Whether the session can keep running after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Spawn(_) | ProcessError::Signal(_))
    }

    /// Sort a failed `spawn()` into "no process could be created" versus
    /// "the program could not be executed".
    pub(crate) fn from_spawn(program: &str, err: std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::EAGAIN | libc::ENOMEM | libc::EMFILE | libc::ENFILE) => {
                ProcessError::Spawn(err)
            }
            _ => ProcessError::Exec {
                program: program.to_owned(),
                source: err,
            },
        }
    }
}
