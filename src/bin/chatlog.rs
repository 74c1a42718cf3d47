//! Interactive chat client that logs the conversation.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: key in open_ai_key.json, log to output.log
//! chatlog
//!
//! # Pick a model and a palette for a dark terminal
//! chatlog --model gpt-4 --color DARKBG
//!
//! # Console only, no log file
//! chatlog --no-log
//! ```
//!
//! Type `q` to quit.  When a log file is written, you are offered the chance
//! to rename it before the program exits.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use arrrg::CommandLine;

use chatlog::chat::{
    ChatArgs, ChatConfig, ChatSession, EditorReader, LineReader, PipedReader, QUIT_COMMAND,
    SessionOutcome,
};
use chatlog::OpenAi;

/// Main entry point for the chatlog application.
fn main() -> ExitCode {
    let (args, _) = ChatArgs::from_command_line_relaxed("chatlog [OPTIONS]");
    match run(args) {
        Ok(outcome) if outcome.is_clean() => ExitCode::SUCCESS,
        // The session has already reported the failure.
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: ChatArgs) -> Result<SessionOutcome, Box<dyn std::error::Error>> {
    let config = ChatConfig::try_from(args)?;
    // Before the runtime exists so the logger can read the local UTC offset.
    let (client, output) = config.start(|api_key, config| {
        OpenAi::with_options(api_key, config.api_base.clone(), Some(config.timeout))
    })?;

    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    })?;

    let reader: Box<dyn LineReader> = if io::stdin().is_terminal() {
        Box::new(EditorReader::new()?)
    } else {
        Box::new(PipedReader::stdio())
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    println!("Chat (model: {})", config.model);
    if let Some(logger) = output.logger() {
        println!("Logging to {}", logger.path().display());
    }
    println!("Type {QUIT_COMMAND} to quit");

    let mut session = ChatSession::new(client, reader, output, config.model);
    Ok(runtime.block_on(session.run()))
}
