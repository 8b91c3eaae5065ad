use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

mod cd;
mod echo;
mod export;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use export::ExportCommand;

use crate::core::state::SessionState;
use crate::highlight::Painter;
use crate::input::ParsedCommand;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{}: {source}", path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A command whose effect must happen inside the shell process itself.
pub trait Builtin {
    /// `args` excludes the command name.
    fn execute(
        &self,
        args: &[String],
        state: &mut SessionState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    NotBuiltin,
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Echo(EchoCommand),
    Export(ExportCommand),
}

impl Builtin for CommandType {
    fn execute(
        &self,
        args: &[String],
        state: &mut SessionState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state, out),
            CommandType::Echo(cmd) => cmd.execute(args, state, out),
            CommandType::Export(cmd) => cmd.execute(args, state, out),
        }
    }
}

#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
    painter: Painter,
}

impl Builtins {
    pub fn new(painter: Painter) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("echo", CommandType::Echo(EchoCommand::new()));
        commands.insert("export", CommandType::Export(ExportCommand::new()));

        Self { commands, painter }
    }

    /// Run `cmd` if it names a builtin. Failures are reported to the user
    /// here and never reach the caller.
    pub fn dispatch(
        &self,
        cmd: &ParsedCommand,
        state: &mut SessionState,
        out: &mut dyn Write,
    ) -> Dispatch {
        let Some(builtin) = self.commands.get(cmd.name()) else {
            return Dispatch::NotBuiltin;
        };

        if cmd.background() {
            debug!(command = cmd.name(), "background marker ignored for builtin");
        }

        if let Err(e) = builtin.execute(cmd.params(), state, out) {
            eprintln!(
                "{}",
                self.painter
                    .error(&format!("mish: {}: {}", cmd.name(), e))
            );
        }
        Dispatch::Handled
    }
}
