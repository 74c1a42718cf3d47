// Public modules
pub mod chat;
pub mod completion;
pub mod credentials;
pub mod error;
pub mod logger;
pub mod observability;

// Re-exports
pub use completion::{Completion, CompletionRequest, CompletionService, OpenAi, Role, Turn};
pub use credentials::load_credential;
pub use error::{Error, Result};
pub use logger::{Color, ColorScheme, Level, Logger, Style};
