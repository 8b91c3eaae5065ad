//! Background collection of finished children.
//!
//! SIGCHLD wakes a dedicated thread which drains every terminated child in
//! the background table with a non-blocking wait. Foreground children never
//! enter the table, so each `Child` is collected by exactly one owner.

use std::collections::HashMap;
use std::process::Child;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use signal_hook::consts::SIGCHLD;
use signal_hook::iterator::{Handle, Signals};
use tracing::{debug, warn};

use super::{ProcessError, TerminationLog};

type ChildTable = HashMap<u32, Child>;

pub struct Reaper {
    children: Arc<Mutex<ChildTable>>,
    log: TerminationLog,
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl Reaper {
    pub fn start(log: TerminationLog) -> Result<Self, ProcessError> {
        let mut signals = Signals::new([SIGCHLD]).map_err(ProcessError::Signal)?;
        let handle = signals.handle();
        let children: Arc<Mutex<ChildTable>> = Arc::default();

        let thread = {
            let children = Arc::clone(&children);
            let log = log.clone();
            thread::Builder::new()
                .name("mish-reaper".into())
                .spawn(move || {
                    for _ in signals.forever() {
                        drain(&children, &log);
                    }
                })
                .map_err(ProcessError::Signal)?
        };

        Ok(Self {
            children,
            log,
            handle,
            thread: Some(thread),
        })
    }

    /// Lock the background table. Holding the guard across a spawn keeps the
    /// reaper from draining before the new child is registered.
    pub(crate) fn table(&self) -> MutexGuard<'_, ChildTable> {
        lock(&self.children)
    }

    /// Number of background children not yet collected.
    pub fn pending(&self) -> usize {
        self.table().len()
    }

    /// Collect every terminated background child right now.
    pub fn reap_now(&self) -> usize {
        drain(&self.children, &self.log)
    }

    pub fn shutdown(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("reaper thread panicked");
            }
        }
        self.reap_now();
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock(children: &Mutex<ChildTable>) -> MutexGuard<'_, ChildTable> {
    children.lock().unwrap_or_else(|e| e.into_inner())
}

fn drain(children: &Mutex<ChildTable>, log: &TerminationLog) -> usize {
    let mut table = lock(children);
    let before = table.len();

    table.retain(|pid, child| match child.try_wait() {
        Ok(Some(status)) => {
            debug!(pid, %status, "reaped background child");
            log.record();
            false
        }
        Ok(None) => true,
        Err(e) => {
            // The pid is no longer ours to wait on; keeping it would spin forever.
            warn!(pid, error = %e, "failed to collect background child");
            false
        }
    });

    before - table.len()
}
