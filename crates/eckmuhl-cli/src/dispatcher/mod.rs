//! Dispatch of one invocation to a built-in or a plugin command.
//!
//! The first argument selects the route: nothing or a help flag prints the
//! command list, a version flag prints the build block, and anything else is
//! looked up among the discovered plugins. Built-ins never load a module, and
//! a plugin route loads exactly one.

use std::io::Write;

use eckmuhl_command::Outcome;
use eckmuhl_plugins::{ModuleLoader, PluginLocator};
use tracing::{debug, info};

use crate::build_info::BuildInfo;
use crate::errors::DispatchError;
use crate::output::{write_help, write_version};

const HELP_ALIASES: [&str; 3] = ["--help", "-help", "help"];
const VERSION_ALIASES: [&str; 3] = ["--version", "-version", "version"];

/// Route selected by the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Invocation<'a> {
    Help,
    Version,
    Plugin { name: &'a str, args: &'a [String] },
}

impl<'a> Invocation<'a> {
    /// Classifies a full argument vector, program name included.
    pub(crate) fn classify(args: &'a [String]) -> Self {
        let Some(first) = args.get(1).map(String::as_str) else {
            return Self::Help;
        };
        if HELP_ALIASES.contains(&first) {
            Self::Help
        } else if VERSION_ALIASES.contains(&first) {
            Self::Version
        } else {
            Self::Plugin {
                name: first,
                args: args.get(2..).unwrap_or_default(),
            }
        }
    }
}

/// Routes one invocation. The plugin registry is rebuilt on every dispatch.
pub(crate) struct Dispatcher<L> {
    locator: PluginLocator,
    loader: L,
    build: BuildInfo,
    year: i32,
}

impl<L: ModuleLoader> Dispatcher<L> {
    pub(crate) const fn new(locator: PluginLocator, loader: L, build: BuildInfo, year: i32) -> Self {
        Self {
            locator,
            loader,
            build,
            year,
        }
    }

    /// Runs the invocation described by `args`, writing built-in output to
    /// `out`.
    pub(crate) fn dispatch<W: Write>(
        &self,
        args: &[String],
        out: &mut W,
    ) -> Result<Outcome, DispatchError> {
        match Invocation::classify(args) {
            Invocation::Help => {
                let registry = self.locator.discover()?;
                write_help(out, self.locator.app_name(), registry.names())?;
                Ok(Outcome::Completed)
            }
            Invocation::Version => {
                write_version(out, &self.build, self.year)?;
                Ok(Outcome::Completed)
            }
            Invocation::Plugin { name, args: rest } => self.run_plugin(name, rest),
        }
    }

    fn run_plugin(&self, name: &str, args: &[String]) -> Result<Outcome, DispatchError> {
        let registry = self.locator.discover()?;
        let path = registry.resolve(name)?;
        info!(command = name, path = %path.display(), "dispatching to plugin");

        let mut command = self.loader.load(path)?;
        let outcome = command.run(args)?;
        debug!(command = name, ?outcome, "plugin command finished");
        Ok(outcome)
    }
}
