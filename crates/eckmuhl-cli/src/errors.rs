//! Errors surfaced by the dispatcher to the host shell.

use std::error::Error as _;
use std::io;
use std::sync::Arc;

use eckmuhl_command::CommandError;
use eckmuhl_plugins::PluginError;
use thiserror::Error;

/// Failures that end a dispatch with exit code 1.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Discovery, resolution or loading failed.
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// The command ran and reported a failure.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Built-in output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[source] Arc<io::Error>),
}

impl From<io::Error> for DispatchError {
    fn from(error: io::Error) -> Self {
        Self::Output(Arc::new(error))
    }
}

impl DispatchError {
    /// Text printed after `>>>` on the error line.
    ///
    /// Command errors are followed by their source chain, since a command's
    /// message alone rarely names the underlying cause. Host-side errors
    /// already embed their cause in the message.
    pub(crate) fn report(&self) -> String {
        let mut text = self.to_string();
        if let Self::Command(error) = self {
            let mut source = error.source();
            while let Some(cause) = source {
                text.push_str(": ");
                text.push_str(&cause.to_string());
                source = cause.source();
            }
        }
        text
    }
}
