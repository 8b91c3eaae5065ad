use std::env;
use std::path::PathBuf;

use crate::flags::Flags;

pub const DEFAULT_LOG_FILE: &str = "shell_log.txt";
pub const LOG_FILE_ENV: &str = "MISH_LOG_FILE";

/// Runtime settings resolved from command-line flags and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_file: PathBuf,
    pub quiet: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            quiet: false,
            debug: false,
        }
    }
}

impl Config {
    /// `--log-file` wins over `MISH_LOG_FILE`, which wins over the default.
    pub fn from_flags(flags: &Flags) -> Self {
        let log_file = flags
            .get_value("log-file")
            .map(PathBuf::from)
            .or_else(|| env::var_os(LOG_FILE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Self {
            log_file,
            quiet: flags.is_set("quiet"),
            debug: flags.is_set("debug"),
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "mish=debug"
        } else {
            "warn"
        }
    }
}
