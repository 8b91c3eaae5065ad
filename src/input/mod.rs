pub mod tokenizer;

use std::io::{self, BufRead, Read, Write};

use rustyline::error::ReadlineError;
use rustyline::{config::Configurer, DefaultEditor};

use crate::error::ShellError;
use tokenizer::MAX_LINE_LEN;

pub use tokenizer::{tokenize, ParseError, ParsedCommand};

/// What one read attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    /// The line exceeded `MAX_LINE_LEN`; its remainder has been discarded.
    Truncated,
    Interrupted,
    Eof,
}

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line, ShellError>;
}

/// Interactive terminal input with line editing.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self, ShellError> {
        let mut editor = DefaultEditor::new()?;
        editor.set_auto_add_history(false);
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) if line.len() > MAX_LINE_LEN => Ok(Line::Truncated),
            Ok(line) => Ok(Line::Text(line)),
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(e) => Err(e.into()),
        }
    }
}

/// Line reader over any buffered stream, used when stdin is not a terminal.
pub struct BufferedSource<R> {
    reader: R,
    show_prompt: bool,
}

impl<R: BufRead> BufferedSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            show_prompt: true,
        }
    }

    pub fn without_prompt(mut self) -> Self {
        self.show_prompt = false;
        self
    }

    fn discard_rest_of_line(&mut self) -> io::Result<()> {
        let mut sink = Vec::new();
        self.reader.read_until(b'\n', &mut sink)?;
        Ok(())
    }
}

impl<R: BufRead> LineSource for BufferedSource<R> {
    fn read_line(&mut self, prompt: &str) -> Result<Line, ShellError> {
        if self.show_prompt {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }

        // One byte past the limit tells an exactly-full line from an overlong one.
        let mut buf = Vec::new();
        let limit = (MAX_LINE_LEN + 1) as u64;
        let read = Read::take(&mut self.reader, limit).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(Line::Eof);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if buf.len() > MAX_LINE_LEN {
            self.discard_rest_of_line()?;
            return Ok(Line::Truncated);
        }

        Ok(Line::Text(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(text: &str) -> BufferedSource<Cursor<Vec<u8>>> {
        BufferedSource::new(Cursor::new(text.as_bytes().to_vec())).without_prompt()
    }

    #[test]
    fn test_reads_lines_then_eof() {
        let mut src = source("ls\necho hi\r\nlast");
        assert_eq!(src.read_line("").unwrap(), Line::Text("ls".into()));
        assert_eq!(src.read_line("").unwrap(), Line::Text("echo hi".into()));
        assert_eq!(src.read_line("").unwrap(), Line::Text("last".into()));
        assert_eq!(src.read_line("").unwrap(), Line::Eof);
    }

    #[test]
    fn test_overlong_line_is_truncated_and_skipped() {
        let long = "x".repeat(MAX_LINE_LEN * 3);
        let mut src = source(&format!("{}\necho ok\n", long));
        assert_eq!(src.read_line("").unwrap(), Line::Truncated);
        assert_eq!(src.read_line("").unwrap(), Line::Text("echo ok".into()));
    }

    #[test]
    fn test_small_buffer_reader() {
        // Lines straddle many refills of a one-byte buffer.
        let text = format!("{}\necho ok\n", "z".repeat(MAX_LINE_LEN + 10));
        let reader = io::BufReader::with_capacity(1, text.as_bytes());
        let mut src = BufferedSource::new(reader).without_prompt();
        assert_eq!(src.read_line("").unwrap(), Line::Truncated);
        assert_eq!(src.read_line("").unwrap(), Line::Text("echo ok".into()));
        assert_eq!(src.read_line("").unwrap(), Line::Eof);
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let exact = "y".repeat(MAX_LINE_LEN);
        let mut src = source(&format!("{}\n", exact));
        assert_eq!(src.read_line("").unwrap(), Line::Text(exact));
    }
}
