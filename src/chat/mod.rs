//! Interactive chat loop.
//!
//! This module provides the REPL that forwards user turns to a completion
//! service and renders replies. It supports:
//!
//! - Bare console output, or a dual-sink [`Logger`](crate::Logger) that also
//!   writes a timestamped log file
//! - The `q` quit command with an optional rename of the log file
//! - A single fatal-abort path for service and output failures
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`input`]: line sources (terminal editor or piped stdin)
//! - [`output`]: the sink replies and errors are rendered to
//! - [`session`]: the turn loop itself

mod config;
mod input;
mod output;
mod session;

pub use config::{
    ChatArgs, ChatConfig, DEFAULT_COLOR_SCHEME, DEFAULT_KEY_FILE, DEFAULT_LOG_FILE, DEFAULT_MODEL,
    OutputSink,
};
pub use input::{EditorReader, LineReader, PipedReader};
pub use output::{Output, REPLY_LABEL};
pub use session::{
    ChatSession, QUIT_COMMAND, RENAME_PROMPT, SessionOutcome, SessionState, USER_PROMPT,
};
