//! Domain errors raised while discovering and loading plugins.
//!
//! All errors use `thiserror`-derived enums with structured context so the
//! host can tell a broken plugin from a missing one. I/O errors are wrapped in
//! `Arc` to keep the enum cheap to move and `Send + Sync`.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use eckmuhl_command::DeclarationMismatch;
use thiserror::Error;

/// Errors arising from plugin discovery and loading.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The running executable could not be located.
    #[error("failed to locate the running executable: {source}")]
    CurrentExecutable {
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The plugin directory could not be read.
    #[error("failed to scan plugin directory {}: {source}", directory.display())]
    Discovery {
        /// Directory being scanned.
        directory: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A command name was empty.
    #[error("plugin {} yields an empty command name", path.display())]
    EmptyName {
        /// Module path.
        path: PathBuf,
    },

    /// Two modules resolve to the same command name.
    #[error(
        "command '{name}' is provided by both {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateName {
        /// Command name.
        name: String,
        /// Module registered first.
        first: PathBuf,
        /// Module rejected.
        second: PathBuf,
    },

    /// No discovered plugin matches the requested command.
    #[error("this command does not exist")]
    UnknownCommand {
        /// Name that was looked up.
        name: String,
    },

    /// The module could not be loaded by the platform loader.
    #[error("failed to load plugin {}: {message}", path.display())]
    LoadFailed {
        /// Module path.
        path: PathBuf,
        /// Loader diagnostic.
        message: String,
    },

    /// The module loaded but does not honour the command contract.
    #[error("plugin {} does not export a valid command: {violation}", path.display())]
    ContractViolation {
        /// Module path.
        path: PathBuf,
        /// What is wrong with the export.
        #[source]
        violation: ContractViolation,
    },
}

/// Ways a loaded module can fail the `Export` negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// The module has no `Export` symbol.
    #[error("symbol `Export` not found: {message}")]
    MissingSymbol {
        /// Loader diagnostic.
        message: String,
    },
    /// The `Export` symbol resolves to a null address.
    #[error("symbol `Export` is null")]
    NullSymbol,
    /// The declaration behind `Export` has the wrong shape.
    #[error(transparent)]
    Declaration(#[from] DeclarationMismatch),
}

impl PluginError {
    pub(crate) fn contract(
        path: impl Into<PathBuf>,
        violation: impl Into<ContractViolation>,
    ) -> Self {
        Self::ContractViolation {
            path: path.into(),
            violation: violation.into(),
        }
    }
}
