//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved,
//! immutable session configuration.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::chat::output::Output;
use crate::credentials::load_credential;
use crate::error::{Error, Result};
use crate::logger::Level;

/// Default credential file.
pub const DEFAULT_KEY_FILE: &str = "open_ai_key.json";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default log file.
pub const DEFAULT_LOG_FILE: &str = "output.log";

/// Default console color scheme.
pub const DEFAULT_COLOR_SCHEME: &str = "AUTOCOLOR";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the chatlog tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// File holding the API key.
    #[arrrg(optional, "File holding the API key (default: open_ai_key.json)", "FILE")]
    pub key_file: Option<String>,

    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gpt-3.5-turbo)", "MODEL")]
    pub model: Option<String>,

    /// File the conversation is logged to.
    #[arrrg(optional, "Log file (default: output.log)", "FILE")]
    pub log_file: Option<String>,

    /// Console color scheme.
    #[arrrg(
        optional,
        "Console colors: AUTOCOLOR, NOCOLOR, LIGHTBG, DARKBG (default: AUTOCOLOR)",
        "SCHEME"
    )]
    pub color: Option<String>,

    /// Least severe level that is logged.
    #[arrrg(optional, "Least severe level logged (default: DEBUG)", "LEVEL")]
    pub log_level: Option<String>,

    /// Skip the log file and print to the console only.
    #[arrrg(flag, "Print to the console only; write no log file")]
    pub no_log: bool,

    /// Base URL of the completion API.
    #[arrrg(optional, "API base URL (default: https://api.openai.com/v1/)", "URL")]
    pub api_base: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,
}

/// Where session output goes.
///
/// Chosen once at startup.  The file variant is only possible when both a log
/// path and a color scheme are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Plain console printing; no log file.
    Console,
    /// A [`Logger`](crate::Logger) writing to the console and to `path`.
    ConsoleAndFile {
        /// The log file.
        path: PathBuf,
        /// The color scheme name, validated when the logger opens.
        scheme: String,
    },
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// File holding the API key.
    pub credential_path: PathBuf,

    /// The model to use for generating responses.
    pub model: String,

    /// The log file, if any.
    pub log_file: Option<PathBuf>,

    /// The console color scheme name, if any.
    pub color_scheme: Option<String>,

    /// Least severe level the logger writes.
    pub log_level: Level,

    /// Base URL of the completion API; `None` uses the default.
    pub api_base: Option<String>,

    /// Request timeout.
    pub timeout: Duration,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Credential file: open_ai_key.json
    /// - Model: gpt-3.5-turbo
    /// - Log file: output.log
    /// - Color scheme: AUTOCOLOR
    /// - Log level: DEBUG
    pub fn new() -> Self {
        Self {
            credential_path: PathBuf::from(DEFAULT_KEY_FILE),
            model: DEFAULT_MODEL.to_string(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            color_scheme: Some(DEFAULT_COLOR_SCHEME.to_string()),
            log_level: Level::Debug,
            api_base: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the credential file.
    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = path.into();
        self
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets or clears the log file.
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Sets or clears the color scheme.
    pub fn with_color_scheme(mut self, scheme: Option<String>) -> Self {
        self.color_scheme = scheme;
        self
    }

    /// Sets the log threshold.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, base: Option<String>) -> Self {
        self.api_base = base;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The output sink this configuration selects.
    pub fn output_sink(&self) -> OutputSink {
        match (&self.log_file, &self.color_scheme) {
            (Some(path), Some(scheme)) => OutputSink::ConsoleAndFile {
                path: path.clone(),
                scheme: scheme.clone(),
            },
            _ => OutputSink::Console,
        }
    }

    /// Loads the credential, opens the output, and builds the service.
    ///
    /// The credential is read first.  When it is missing or unreadable the
    /// error is returned before the log file is touched or `make_service`
    /// runs, so no request can be sent.
    pub fn start<S, F>(&self, make_service: F) -> Result<(S, Output)>
    where
        F: FnOnce(String, &ChatConfig) -> Result<S>,
    {
        let api_key = load_credential(&self.credential_path)?;
        let output = Output::open(&self.output_sink(), self.log_level)?;
        let service = make_service(api_key, self)?;
        Ok((service, output))
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let defaults = ChatConfig::new();
        let log_level = match args.log_level {
            Some(level) => level.parse()?,
            None => defaults.log_level,
        };
        let log_file = if args.no_log {
            None
        } else {
            args.log_file.map(PathBuf::from).or(defaults.log_file)
        };
        Ok(ChatConfig {
            credential_path: args
                .key_file
                .map(PathBuf::from)
                .unwrap_or(defaults.credential_path),
            model: args.model.unwrap_or(defaults.model),
            log_file,
            color_scheme: args.color.or(defaults.color_scheme),
            log_level,
            api_base: args.api_base,
            timeout: args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        })
    }
}
