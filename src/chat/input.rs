//! Line input for the chat loop.

use std::io::{self, BufRead, Write};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};

/// A blocking source of user lines.
pub trait LineReader {
    /// Shows `prompt` and blocks for one line.
    ///
    /// Returns `Ok(None)` when input has ended (end of file, or an interrupt
    /// at the prompt).  The returned line carries no trailing newline.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl<L: LineReader + ?Sized> LineReader for Box<L> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Interactive input with line editing and history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    /// Creates a reader over the controlling terminal.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(readline_error)?;
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(readline_error(err)),
        }
    }
}

fn readline_error(err: ReadlineError) -> Error {
    match err {
        ReadlineError::Io(err) => Error::io("failed to read input", err),
        err => Error::io("failed to read input", io::Error::other(err.to_string())),
    }
}

/// Input from any buffered reader, with prompts echoed to a writer.
///
/// Used when stdin is not a terminal.
pub struct PipedReader<R, W> {
    input: R,
    prompts: W,
}

impl<R: BufRead, W: Write> PipedReader<R, W> {
    /// Reads lines from `input` and writes each prompt to `prompts`.
    pub fn new(input: R, prompts: W) -> Self {
        Self { input, prompts }
    }
}

impl PipedReader<io::StdinLock<'static>, io::Stdout> {
    /// Reads from stdin and prompts on stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineReader for PipedReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.prompts, "{prompt}")
            .and_then(|_| self.prompts.flush())
            .map_err(|err| Error::io("failed to write prompt", err))?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|err| Error::io("failed to read input", err))?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn piped_reader_strips_newlines_and_echoes_prompts() {
        let mut prompts = Vec::new();
        {
            let mut reader = PipedReader::new(Cursor::new("hello\r\n  spaced  \n"), &mut prompts);
            assert_eq!(reader.read_line("> ").unwrap().as_deref(), Some("hello"));
            assert_eq!(
                reader.read_line("> ").unwrap().as_deref(),
                Some("  spaced  ")
            );
            assert_eq!(reader.read_line("> ").unwrap(), None);
        }
        assert_eq!(String::from_utf8(prompts).unwrap(), "> > > ");
    }

    #[test]
    fn piped_reader_last_line_without_newline() {
        let mut reader = PipedReader::new(Cursor::new("q"), io::sink());
        assert_eq!(reader.read_line("").unwrap().as_deref(), Some("q"));
        assert_eq!(reader.read_line("").unwrap(), None);
    }
}
