//! Discovery of plugin modules installed beside the host executable.
//!
//! A module is a regular file named `<app>.<command>.<ext>` in the directory
//! of the running executable, where `<app>` is the base name the host was
//! invoked under and `<ext>` is the platform library extension. Invoking the
//! host through a symlink therefore selects the plugins named after the link
//! while still searching the real executable's directory.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::PluginError;
use crate::registry::PluginRegistry;

/// Scans one directory for modules following the naming convention.
///
/// # Example
///
/// ```
/// use eckmuhl_plugins::PluginLocator;
///
/// let locator = PluginLocator::new("/opt/bin", "toolx").with_extension("so");
/// assert_eq!(locator.command_name("toolx.build.so"), Some("build"));
/// assert_eq!(locator.command_name("other.build.so"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginLocator {
    directory: PathBuf,
    app_name: String,
    extension: String,
}

impl PluginLocator {
    /// Creates a locator for `app_name` plugins in `directory`, using the
    /// platform library extension.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, app_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            app_name: app_name.into(),
            extension: env::consts::DLL_EXTENSION.to_owned(),
        }
    }

    /// Overrides the module extension (without the leading dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builds the locator for the running process.
    ///
    /// The search directory is the directory of the running executable and
    /// the file prefix is the base name of `argv0`. When `argv0` has no usable
    /// base name the executable's own name is used.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::CurrentExecutable`] when the executable path
    /// cannot be determined.
    pub fn from_process(argv0: &OsStr) -> Result<Self, PluginError> {
        let executable = env::current_exe().map_err(|source| PluginError::CurrentExecutable {
            source: Arc::new(source),
        })?;
        let directory = executable
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let app_name = app_name_from(Path::new(argv0))
            .or_else(|| app_name_from(&executable))
            .unwrap_or_default();
        debug!(
            directory = %directory.display(),
            app = %app_name,
            "resolved plugin search location"
        );
        Ok(Self::new(directory, app_name))
    }

    /// Directory searched for modules.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    /// Base name used as the module file prefix.
    #[must_use]
    pub fn app_name(&self) -> &str {
        self.app_name.as_str()
    }

    /// Extracts the command name from a module file name.
    ///
    /// Returns `None` when the file name does not follow
    /// `<app>.<command>.<ext>` or the command part is empty.
    #[must_use]
    pub fn command_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let rest = file_name
            .strip_prefix(self.app_name.as_str())?
            .strip_prefix('.')?;
        let name = rest
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        (!name.is_empty()).then_some(name)
    }

    /// Builds the registry of modules currently installed.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Discovery`] when the directory or one of its
    /// entries cannot be read; no partial registry is returned.
    pub fn discover(&self) -> Result<PluginRegistry, PluginError> {
        let scan_error = |source: io::Error| PluginError::Discovery {
            directory: self.directory.clone(),
            source: Arc::new(source),
        };

        let mut registry = PluginRegistry::new();
        for entry in fs::read_dir(&self.directory).map_err(scan_error)? {
            let entry = entry.map_err(scan_error)?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(|name| self.command_name(name)) else {
                continue;
            };
            let path = entry.path();
            if !path.is_file() {
                trace!(path = %path.display(), "skipping non-file candidate");
                continue;
            }
            registry.register(name, path)?;
        }

        debug!(
            directory = %self.directory.display(),
            count = registry.len(),
            "plugin discovery finished"
        );
        Ok(registry)
    }
}

fn app_name_from(path: &Path) -> Option<String> {
    let file_name = path.file_name()?;
    let exe_extension = env::consts::EXE_EXTENSION;
    let base = if !exe_extension.is_empty()
        && path.extension() == Some(OsStr::new(exe_extension))
    {
        path.file_stem()?
    } else {
        file_name
    };
    let name = base.to_string_lossy().into_owned();
    (!name.is_empty()).then_some(name)
}
