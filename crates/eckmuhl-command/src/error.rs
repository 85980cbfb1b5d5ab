//! Failure type returned by commands.

use std::error::Error;
use std::io;

use thiserror::Error;

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// Error returned by a command that failed.
///
/// The message is what the host prints after `>>>`; an optional source is
/// appended as `message: source`.
///
/// # Example
///
/// ```
/// use eckmuhl_command::CommandError;
///
/// let error = CommandError::new("nothing to deploy");
/// assert_eq!(error.to_string(), "nothing to deploy");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl CommandError {
    /// Creates an error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the message without the source chain.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<io::Error> for CommandError {
    fn from(source: io::Error) -> Self {
        Self::with_source("I/O error", source)
    }
}
