//! Core chat session management.
//!
//! A [`ChatSession`] reads one line at a time, sends the whole transcript to
//! the completion service, and renders the reply.  It stops on the quit
//! command, at end of input, or after the first failure.  Failures are never
//! retried.

use crate::chat::input::LineReader;
use crate::chat::output::Output;
use crate::completion::{CompletionRequest, CompletionService, Turn};
use crate::error::{Error, Result};
use crate::logger::Level;
use crate::observability::{CHAT_ABORTS, CHAT_TURNS};

/// Prompt shown before each user turn.
pub const USER_PROMPT: &str = "\nUser > ";

/// Typing this (any case, surrounding blanks ignored) ends the session.
pub const QUIT_COMMAND: &str = "q";

/// Prompt asking for a new name for the log file.
pub const RENAME_PROMPT: &str = "Enter log file name or press enter to use the default name: ";

/// Logged when the user quits.
const CLOSING_MESSAGE: &str = "closing the conversation";

/// Where the session loop currently is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Blocked on user input.
    AwaitingInput,
    /// Building the request from the transcript.
    Dispatching,
    /// Waiting on the completion service.
    AwaitingReply,
    /// Writing the reply to the output.
    Rendering,
    /// A failure is being reported.
    Aborted,
    /// The session is over.
    Terminated,
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The user typed the quit command.
    Quit,
    /// Input ran out.
    EndOfInput,
    /// The completion service or an output sink failed.
    Aborted(Error),
}

impl SessionOutcome {
    /// True if the session ended without a failure.
    pub fn is_clean(&self) -> bool {
        !matches!(self, SessionOutcome::Aborted(_))
    }
}

/// A chat session that owns the transcript and drives the turn loop.
pub struct ChatSession<S: CompletionService, R: LineReader> {
    service: S,
    reader: R,
    output: Output,
    model: String,
    transcript: Vec<Turn>,
    state: SessionState,
}

impl<S: CompletionService, R: LineReader> ChatSession<S, R> {
    /// Creates a new session.
    pub fn new(service: S, reader: R, output: Output, model: impl Into<String>) -> Self {
        Self {
            service,
            reader,
            output,
            model: model.into(),
            transcript: Vec::new(),
            state: SessionState::AwaitingInput,
        }
    }

    /// The turns exchanged so far.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// The current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The active output.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Runs the loop until the user quits, input ends, or something fails.
    pub async fn run(&mut self) -> SessionOutcome {
        loop {
            self.state = SessionState::AwaitingInput;
            let line = match self.reader.read_line(USER_PROMPT) {
                Ok(Some(line)) => line,
                Ok(None) => return self.terminate(SessionOutcome::EndOfInput),
                Err(err) => return self.abort(err),
            };
            if line.trim().eq_ignore_ascii_case(QUIT_COMMAND) {
                return self.quit();
            }
            if let Err(err) = self.take_turn(line).await {
                return self.abort(err);
            }
        }
    }

    async fn take_turn(&mut self, line: String) -> Result<()> {
        self.transcript.push(Turn::user(line));

        self.state = SessionState::Dispatching;
        let request = CompletionRequest::new(self.model.clone(), self.transcript.clone());

        self.state = SessionState::AwaitingReply;
        let completion = self.service.complete(&request).await?;
        let reply = completion.first_text()?.trim().to_string();

        self.state = SessionState::Rendering;
        self.transcript.push(Turn::assistant(reply.clone()));
        CHAT_TURNS.click();
        self.output.reply(&reply)
    }

    fn quit(&mut self) -> SessionOutcome {
        if let Some(logger) = self.output.logger_mut() {
            if let Err(err) = logger.render(Level::Info, CLOSING_MESSAGE, None) {
                return self.abort(err);
            }
            self.rename_log();
        }
        self.terminate(SessionOutcome::Quit)
    }

    fn rename_log(&mut self) {
        let name = match self.reader.read_line(RENAME_PROMPT) {
            Ok(Some(name)) if !name.trim().is_empty() => name,
            Ok(_) => return,
            Err(err) => {
                self.report(&format!("Could not read log file name: {err}"));
                return;
            }
        };
        let result = match self.output.logger_mut() {
            Some(logger) => logger.rename_file(&name).map(|_| ()),
            None => Ok(()),
        };
        if let Err(err) = result {
            self.report(&format!("Could not rename log file: {err}"));
        }
    }

    fn abort(&mut self, err: Error) -> SessionOutcome {
        self.state = SessionState::Aborted;
        CHAT_ABORTS.click();
        self.report(&format!("An error occurred: {err}"));
        self.terminate(SessionOutcome::Aborted(err))
    }

    fn report(&mut self, message: &str) {
        if self.output.error(message).is_err() {
            eprintln!("{message}");
        }
    }

    fn terminate(&mut self, outcome: SessionOutcome) -> SessionOutcome {
        self.state = SessionState::Terminated;
        outcome
    }
}
