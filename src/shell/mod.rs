use std::io::{self, IsTerminal, Write};

mod executor;

use crate::{
    config::Config,
    core::{commands::Builtins, state::SessionState},
    error::ShellError,
    highlight::Painter,
    input::{tokenizer::MAX_LINE_LEN, BufferedSource, EditorSource, Line, LineSource},
    process::{Launcher, TerminationLog},
};

pub use executor::{CommandHandler, Flow, EXIT_DIRECTIVE};

pub struct Shell<W: Write = io::Stdout> {
    pub(crate) input: Box<dyn LineSource>,
    pub(crate) out: W,
    pub(crate) state: SessionState,
    pub(crate) builtins: Builtins,
    pub(crate) launcher: Launcher,
    pub(crate) painter: Painter,
    pub(crate) config: Config,
}

impl Shell {
    /// Interactive shell on the process's own stdin/stdout.
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let input: Box<dyn LineSource> = if io::stdin().is_terminal() {
            Box::new(EditorSource::new()?)
        } else {
            let source = BufferedSource::new(io::stdin().lock());
            if config.quiet {
                Box::new(source.without_prompt())
            } else {
                Box::new(source)
            }
        };

        let painter = Painter::new();
        let quiet = config.quiet;
        ctrlc::set_handler(move || {
            if !quiet {
                println!("\n{}", painter.hint("Use 'exit' to exit the shell"));
            }
        })?;

        Shell::with_io(config, input, io::stdout(), painter)
    }
}

impl<W: Write> Shell<W> {
    pub fn with_io(
        config: Config,
        input: Box<dyn LineSource>,
        out: W,
        painter: Painter,
    ) -> Result<Self, ShellError> {
        let state = SessionState::new()?;
        let log = TerminationLog::open(&config.log_file)?;
        let launcher = Launcher::new(log)?;

        Ok(Shell {
            input,
            out,
            state,
            builtins: Builtins::new(painter),
            launcher,
            painter,
            config,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = self.state.prompt();
            match self.input.read_line(&prompt)? {
                Line::Text(line) => {
                    if self.execute_command(&line)? == Flow::Exit {
                        break;
                    }
                }
                Line::Truncated => {
                    self.report(&format!(
                        "mish: input line too long (max {} bytes)",
                        MAX_LINE_LEN
                    ));
                }
                Line::Interrupted => continue,
                Line::Eof => {
                    if !self.config.quiet {
                        writeln!(self.out)?;
                    }
                    break;
                }
            }
        }
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub(crate) fn report(&self, message: &str) {
        eprintln!("{}", self.painter.error(message));
    }
}
