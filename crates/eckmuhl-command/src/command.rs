//! The command trait and its tri-state result.

use crate::error::CommandError;

/// How a command finished when it did not fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    /// The command did its work.
    #[default]
    Completed,
    /// The command ended early on purpose, for example after printing its
    /// own help. The host exits successfully and reports nothing.
    Stopped,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Stopped`].
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Result returned by [`Command::run`].
pub type CommandResult = Result<Outcome, CommandError>;

/// A command exported by a plugin.
///
/// One instance is built per process run and `run` is called exactly once
/// with the arguments following the command name, verbatim.
pub trait Command {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] when the command fails; the host reports it
    /// and exits with status 1.
    fn run(&mut self, args: &[String]) -> CommandResult;
}
