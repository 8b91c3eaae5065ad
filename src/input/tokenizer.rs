use thiserror::Error;

/// Longest line accepted from the user, in bytes.
pub const MAX_LINE_LEN: usize = 1024;
/// Most tokens (command name included) a single line may carry.
pub const MAX_ARGS: usize = 63;

const BACKGROUND_MARKER: char = '&';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input line too long ({len} bytes, max {max})")]
    LineTooLong { len: usize, max: usize },
    #[error("too many arguments ({count}, max {max})")]
    TooManyArguments { count: usize, max: usize },
}

/// One tokenized line: `args[0]` is always the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    args: Vec<String>,
    background: bool,
}

impl ParsedCommand {
    pub fn name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// The full argument vector, name included, as handed to exec.
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    /// Arguments after the command name.
    pub fn params(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn background(&self) -> bool {
        self.background
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

pub fn tokenize(line: &str) -> Result<ParsedCommand, ParseError> {
    if line.len() > MAX_LINE_LEN {
        return Err(ParseError::LineTooLong {
            len: line.len(),
            max: MAX_LINE_LEN,
        });
    }

    let trimmed = line.trim_end();
    let (body, background) = match trimmed.strip_suffix(BACKGROUND_MARKER) {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    };

    let args: Vec<String> = body.split_whitespace().map(str::to_owned).collect();
    if args.len() > MAX_ARGS {
        return Err(ParseError::TooManyArguments {
            count: args.len(),
            max: MAX_ARGS,
        });
    }

    Ok(ParsedCommand { args, background })
}
