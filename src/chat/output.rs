//! The session's active output sink.

use std::io::{self, Write};

use crate::chat::config::OutputSink;
use crate::error::{Error, Result};
use crate::logger::{Color, Level, Logger, Style};

/// Label in front of every rendered reply.
pub const REPLY_LABEL: &str = "Assistant > ";

/// Console color for replies when a logger is active.
const REPLY_STYLE: Style = Style::fg(Color::Green);

/// Where replies and errors are rendered.
pub enum Output {
    /// Plain lines on a console writer.
    Console(Box<dyn Write + Send>),
    /// A dual-sink logger.
    Logger(Logger),
}

impl Output {
    /// Plain output on stdout.
    pub fn console() -> Self {
        Output::Console(Box::new(io::stdout()))
    }

    /// Builds the output `sink` describes.
    ///
    /// # Errors
    ///
    /// Fails when the logger cannot be constructed: an unknown scheme or an
    /// unwritable log file.
    pub fn open(sink: &OutputSink, threshold: Level) -> Result<Self> {
        match sink {
            OutputSink::Console => Ok(Output::console()),
            OutputSink::ConsoleAndFile { path, scheme } => Ok(Output::Logger(
                Logger::open(path, scheme)?.with_threshold(threshold),
            )),
        }
    }

    /// The logger, when one is active.
    pub fn logger(&self) -> Option<&Logger> {
        match self {
            Output::Logger(logger) => Some(logger),
            Output::Console(_) => None,
        }
    }

    /// The logger, when one is active.
    pub fn logger_mut(&mut self) -> Option<&mut Logger> {
        match self {
            Output::Logger(logger) => Some(logger),
            Output::Console(_) => None,
        }
    }

    /// Renders an assistant reply.  The logger's threshold does not apply.
    pub fn reply(&mut self, text: &str) -> Result<()> {
        let line = format!("{REPLY_LABEL}{text}");
        match self {
            Output::Logger(logger) => logger.render(Level::Info, &line, Some(REPLY_STYLE)),
            Output::Console(console) => print_line(console, &line),
        }
    }

    /// Renders an error.
    pub fn error(&mut self, message: &str) -> Result<()> {
        match self {
            Output::Logger(logger) => logger.render(Level::Error, message, None),
            Output::Console(console) => print_line(console, message),
        }
    }
}

fn print_line(console: &mut Box<dyn Write + Send>, line: &str) -> Result<()> {
    writeln!(console, "{line}")
        .and_then(|_| console.flush())
        .map_err(|err| Error::io("failed to write to console", err))
}
