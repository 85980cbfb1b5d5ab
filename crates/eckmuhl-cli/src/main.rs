//! Entry point for the `eckmuhl` command dispatcher.
//!
//! Installs telemetry from the environment, then delegates to
//! [`eckmuhl_cli::run`].

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

use eckmuhl_cli::config::LogSettings;
use eckmuhl_cli::telemetry;

fn main() -> ExitCode {
    if let Err(error) = telemetry::initialise(&LogSettings::from_env()) {
        tracing::warn!(%error, "telemetry unavailable");
    }
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    eckmuhl_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
