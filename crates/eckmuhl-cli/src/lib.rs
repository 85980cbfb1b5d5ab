//! Host runtime for the eckmuhl command dispatcher.
//!
//! The host discovers plugin modules installed beside its executable, routes
//! the first argument to a built-in (`help`, `version`) or to the matching
//! plugin, and maps the result to a process exit code. Failures are printed
//! as a single `Error: cmd=<command> >>> <message>` line on stderr.
//!
//! [`run`] takes its arguments and output streams as parameters so the whole
//! shell can be exercised from tests.

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::process::ExitCode;

use eckmuhl_plugins::{DynamicLoader, ModuleLoader, PluginLocator};
use time::OffsetDateTime;
use tracing::debug;

mod build_info;
pub mod config;
mod dispatcher;
mod errors;
mod output;
pub mod telemetry;

pub use build_info::BuildInfo;
pub use errors::DispatchError;

use dispatcher::Dispatcher;

/// Runs the host with the provided arguments and IO handles.
///
/// `args` is the full argument vector, program name first. Arguments that
/// are not valid Unicode are converted lossily.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let arguments: Vec<String> = args
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let argv0 = arguments.first().map_or("", String::as_str);

    let locator = match PluginLocator::from_process(OsStr::new(argv0)) {
        Ok(locator) => locator,
        Err(error) => return report_failure(stderr, &arguments, &error.into()),
    };
    let dispatcher = Dispatcher::new(
        locator,
        DynamicLoader,
        BuildInfo::current(),
        OffsetDateTime::now_utc().year(),
    );
    run_with_dispatcher(&dispatcher, &arguments, stdout, stderr)
}

fn run_with_dispatcher<L, W, E>(
    dispatcher: &Dispatcher<L>,
    args: &[String],
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode
where
    L: ModuleLoader,
    W: Write,
    E: Write,
{
    match dispatcher.dispatch(args, stdout) {
        Ok(outcome) => {
            if outcome.is_stop() {
                debug!("command stopped early");
            }
            ExitCode::SUCCESS
        }
        Err(error) => report_failure(stderr, args, &error),
    }
}

fn report_failure<E: Write>(stderr: &mut E, args: &[String], error: &DispatchError) -> ExitCode {
    let command = args.get(1).map_or("", String::as_str);
    if let Err(write_error) = writeln!(stderr, "Error: cmd={command} >>> {}", error.report()) {
        debug!(%write_error, "failed to write the error line");
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests;
