//! Plugin discovery and loading for the eckmuhl host.
//!
//! Plugins are dynamic libraries installed beside the host executable and
//! named `<host>.<command>.<suffix>`, where `<suffix>` is the platform's
//! library extension (`so`, `dylib` or `dll`). The crate splits the work in
//! three steps:
//!
//! 1. [`PluginLocator`] scans the host directory and builds a
//!    [`PluginRegistry`] mapping command names to module paths.
//! 2. [`PluginRegistry::resolve`] matches the requested command exactly.
//! 3. A [`ModuleLoader`] (in production the [`DynamicLoader`]) opens the
//!    module, negotiates the `Export` declaration and builds the command.
//!
//! # Example
//!
//! ```rust,no_run
//! use eckmuhl_plugins::{DynamicLoader, ModuleLoader, PluginLocator};
//!
//! let locator = PluginLocator::from_process("toolx".as_ref())?;
//! let registry = locator.discover()?;
//! let path = registry.resolve("build")?;
//! let mut command = DynamicLoader.load(path)?;
//! command.run(&["--flag".to_owned()])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod loader;
pub mod locator;
pub mod registry;

#[cfg(test)]
mod tests;

pub use self::error::{ContractViolation, PluginError};
pub use self::loader::{DynamicLoader, ModuleLoader};
pub use self::locator::PluginLocator;
pub use self::registry::PluginRegistry;
