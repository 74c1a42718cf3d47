//! Error types for chatlog.
//!
//! Every failure the client can surface is folded into one of five variants.
//! Configuration and credential errors happen before a session starts; I/O and
//! completion errors end a running session.

use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// The main error type for chatlog.
#[derive(Clone, Debug)]
pub enum Error {
    /// A configuration value was not recognized (color scheme, color name).
    Configuration {
        /// Human-readable error message.
        message: String,
    },

    /// The credential file does not exist.
    CredentialNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A sink could not be opened, written, or renamed.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },

    /// A log level name was not one of the five known levels.
    InvalidLevel {
        /// The level name that was rejected.
        level: String,
    },

    /// The completion service failed.  Network, status, and decoding failures
    /// all land here; the session treats them alike.
    Completion {
        /// Human-readable error message.
        message: String,
        /// HTTP status code, when the service answered.
        status_code: Option<u16>,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new credential-not-found error.
    pub fn credential_not_found(path: impl Into<PathBuf>) -> Self {
        Error::CredentialNotFound { path: path.into() }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new invalid level error.
    pub fn invalid_level(level: impl Into<String>) -> Self {
        Error::InvalidLevel {
            level: level.into(),
        }
    }

    /// Creates a new completion error.
    pub fn completion(
        message: impl Into<String>,
        status_code: Option<u16>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Completion {
            message: message.into(),
            status_code,
            source: source.map(Arc::from),
        }
    }

    /// Returns true if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    /// Returns true if this error is a missing credential file.
    pub fn is_credential_not_found(&self) -> bool {
        matches!(self, Error::CredentialNotFound { .. })
    }

    /// Returns true if this error is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }

    /// Returns true if this error is an invalid level.
    pub fn is_invalid_level(&self) -> bool {
        matches!(self, Error::InvalidLevel { .. })
    }

    /// Returns true if this error came from the completion service.
    pub fn is_completion(&self) -> bool {
        matches!(self, Error::Completion { .. })
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Completion { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message } => {
                write!(f, "Configuration error: {message}")
            }
            Error::CredentialNotFound { path } => {
                write!(f, "The file {} does not exist.", path.display())
            }
            Error::Io { message, source } => {
                write!(f, "I/O error: {message}: {source}")
            }
            Error::InvalidLevel { level } => {
                write!(f, "Invalid log level: {level}")
            }
            Error::Completion {
                message,
                status_code,
                ..
            } => {
                if let Some(status_code) = status_code {
                    write!(f, "Completion error: {message} (status {status_code})")
                } else {
                    write!(f, "Completion error: {message}")
                }
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Completion { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::completion(format!("JSON error: {err}"), None, Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("URL parse error: {err}"))
    }
}

/// A specialized Result type for chatlog operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_variants() {
        assert!(Error::configuration("bad").is_configuration());
        assert!(Error::credential_not_found("key.json").is_credential_not_found());
        assert!(Error::invalid_level("TRACE").is_invalid_level());
        assert!(Error::completion("boom", None, None).is_completion());
        let err = Error::io("write", io::Error::other("disk full"));
        assert!(err.is_io());
        assert!(!err.is_completion());
    }

    #[test]
    fn display_completion_with_status() {
        let err = Error::completion("rate limited", Some(429), None);
        assert_eq!(err.to_string(), "Completion error: rate limited (status 429)");
        assert_eq!(err.status_code(), Some(429));
    }

    #[test]
    fn display_credential_not_found() {
        let err = Error::credential_not_found("missing.json");
        assert_eq!(err.to_string(), "The file missing.json does not exist.");
    }

    #[test]
    fn io_error_exposes_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(error::Error::source(&err).is_some());
    }
}
