//! Registry mapping command names to plugin modules.
//!
//! The [`PluginRegistry`] is built fresh by every discovery pass and owned by
//! the dispatcher for one process run. Names are kept ordered so listings are
//! sorted without extra work. Duplicate registrations are rejected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PluginError;

/// Command names mapped to module paths.
///
/// # Example
///
/// ```
/// use eckmuhl_plugins::PluginRegistry;
/// use std::path::PathBuf;
///
/// let mut registry = PluginRegistry::new();
/// registry
///     .register("deploy", PathBuf::from("/opt/bin/toolx.deploy.so"))
///     .expect("registration succeeds");
/// registry
///     .register("build", PathBuf::from("/opt/bin/toolx.build.so"))
///     .expect("registration succeeds");
///
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["build", "deploy"]);
/// assert!(registry.resolve("nope").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, PathBuf>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the module at `path` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::EmptyName`] for an empty name and
    /// [`PluginError::DuplicateName`] when the name is already taken.
    pub fn register(&mut self, name: impl Into<String>, path: PathBuf) -> Result<(), PluginError> {
        let command = name.into();
        if command.is_empty() {
            return Err(PluginError::EmptyName { path });
        }
        if let Some(first) = self.plugins.get(&command) {
            return Err(PluginError::DuplicateName {
                name: command,
                first: first.clone(),
                second: path,
            });
        }
        debug!(command = %command, path = %path.display(), "registered plugin");
        self.plugins.insert(command, path);
        Ok(())
    }

    /// Looks up the module registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.plugins.get(name).map(PathBuf::as_path)
    }

    /// Resolves `name` to its module, matching the full name exactly.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnknownCommand`] when no module matches.
    pub fn resolve(&self, name: &str) -> Result<&Path, PluginError> {
        self.get(name).ok_or_else(|| PluginError::UnknownCommand {
            name: name.to_owned(),
        })
    }

    /// Command names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Entries in lexicographic order of command name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.plugins
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` when no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
