//! End-to-end sessions driven through scripted input.

use std::env;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use mish::config::Config;
use mish::highlight::Painter;
use mish::input::BufferedSource;
use mish::process::termination_log::TERMINATION_MESSAGE;
use mish::shell::{CommandHandler, Flow, Shell};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

static CWD_LOCK: Mutex<()> = Mutex::new(());

fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Restores the working directory on drop, panics included.
struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    fn new() -> Self {
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

fn shell(dir: &TempDir, script: &str) -> Shell<Vec<u8>> {
    let config = Config {
        log_file: dir.path().join("shell_log.txt"),
        quiet: true,
        debug: false,
    };
    let input = BufferedSource::new(Cursor::new(script.as_bytes().to_vec())).without_prompt();
    Shell::with_io(config, Box::new(input), Vec::new(), Painter::plain()).unwrap()
}

fn output(shell: &Shell<Vec<u8>>) -> String {
    String::from_utf8(shell.output().clone()).unwrap()
}

fn log_lines(path: &Path) -> usize {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|l| *l == TERMINATION_MESSAGE)
        .count()
}

fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    done()
}

#[test]
fn test_echo_session() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(&dir, "echo a b c\necho\n   \n&\nexit\necho unreachable\n");
    sh.run().unwrap();
    assert_eq!(output(&sh), "a b c\n\n");
}

#[test]
fn test_eof_ends_session() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(&dir, "echo one");
    sh.run().unwrap();
    assert_eq!(output(&sh), "one\n");
}

#[test]
fn test_blank_and_exit_directives() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(&dir, "");

    assert_eq!(sh.execute_command("").unwrap(), Flow::Continue);
    assert_eq!(sh.execute_command(" \t ").unwrap(), Flow::Continue);
    assert_eq!(sh.execute_command("&").unwrap(), Flow::Continue);
    assert_eq!(sh.execute_command("exit").unwrap(), Flow::Exit);
    assert_eq!(log_lines(&dir.path().join("shell_log.txt")), 0);
}

#[test]
fn test_failing_commands_keep_session_alive() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let mut sh = shell(
        &dir,
        "false\nmish-no-such-program\ncd /path/that/does/not/exist\necho still here\n",
    );
    sh.run().unwrap();
    assert_eq!(output(&sh), "still here\n");
    // `false` and the child that failed to exec each leave one record.
    assert_eq!(log_lines(&dir.path().join("shell_log.txt")), 2);
}

#[test]
fn test_overlong_line_is_rejected() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let script = format!("echo {}\necho after\n", "x".repeat(4096));
    let mut sh = shell(&dir, &script);
    sh.run().unwrap();
    assert_eq!(output(&sh), "after\n");
}

#[test]
fn test_cd_tracks_os_directory() {
    let _cwd = CwdGuard::new();
    let dir = tempfile::tempdir().unwrap();
    let target = fs::canonicalize(dir.path()).unwrap();
    fs::create_dir(target.join("sub")).unwrap();

    let mut sh = shell(&dir, "");
    sh.execute_command(&format!("cd {}", target.join("sub").display()))
        .unwrap();
    assert_eq!(sh.state().current_dir(), target.join("sub"));

    sh.execute_command("cd ..").unwrap();
    assert_eq!(sh.state().current_dir(), target);

    sh.execute_command("cd does-not-exist").unwrap();
    assert_eq!(sh.state().current_dir(), env::current_dir().unwrap());
    assert_eq!(sh.state().prompt(), format!("{}$ ", target.display()));
}

#[test]
fn test_export_visible_to_children() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("env.txt");
    let script = dir.path().join("dump.sh");
    fs::write(&script, "#!/bin/sh\nenv > \"$MISH_DUMP\"\n").unwrap();

    let mut sh = shell(&dir, "");
    sh.execute_command(&format!("export MISH_DUMP={}", dump.display()))
        .unwrap();
    sh.execute_command("export MISH_SESSION_FOO=bar").unwrap();
    sh.execute_command("export MISH_SESSION_BAZ").unwrap();
    sh.execute_command(&format!("sh {}", script.display()))
        .unwrap();

    let env_dump = fs::read_to_string(&dump).unwrap();
    assert!(env_dump.lines().any(|l| l == "MISH_SESSION_FOO=bar"));
    assert!(!env_dump.contains("MISH_SESSION_BAZ"));
}

#[test]
fn test_background_children_reaped_exactly_once() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("shell_log.txt");
    let mut sh = shell(&dir, "");

    let started = Instant::now();
    sh.execute_command("sleep 0.5 &").unwrap();
    sh.execute_command("sleep 0.1&").unwrap();
    assert!(started.elapsed() < Duration::from_millis(500));

    assert!(wait_until(|| sh.launcher().reaper().pending() == 0));
    assert!(wait_until(|| log_lines(&log) == 2));
    thread::sleep(Duration::from_millis(200));
    assert_eq!(log_lines(&log), 2);
}

#[test]
fn test_background_children_finish_after_session_exit() {
    let _cwd = cwd_lock();
    let dir = tempfile::tempdir().unwrap();
    let log: PathBuf = dir.path().join("shell_log.txt");
    {
        let mut sh = shell(&dir, "true &\nexit\n");
        sh.run().unwrap();
        assert!(wait_until(|| sh.launcher().reaper().pending() == 0));
    }
    assert_eq!(log_lines(&log), 1);
}
