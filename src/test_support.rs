use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use crate::process::termination_log::TERMINATION_MESSAGE;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that read or change the process working directory.
pub(crate) fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Holds the cwd lock and puts the working directory back on drop, even
/// when the test panics halfway.
pub(crate) struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    pub(crate) fn new() -> Self {
        let lock = cwd_lock();
        Self {
            original: env::current_dir().unwrap(),
            _lock: lock,
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

/// Count termination records in a log file.
pub(crate) fn log_lines(path: &Path) -> usize {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|l| *l == TERMINATION_MESSAGE)
        .count()
}

/// Poll `done` for up to ten seconds.
pub(crate) fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    done()
}
