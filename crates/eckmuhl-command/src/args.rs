//! Argument parsing helper for commands built on `clap`.
//!
//! `--help` and `--version` are not failures: the rendered text is written
//! to the supplied output and the caller receives [`Parsed::Stop`], which it
//! should turn into [`Outcome::Stopped`](crate::Outcome::Stopped).

use std::io::Write;

use clap::Parser;
use clap::error::ErrorKind;

use crate::error::CommandError;

/// Result of parsing a command's residual arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<T> {
    /// Arguments parsed successfully.
    Args(T),
    /// Help or version text was written; the command should stop.
    Stop,
}

/// Parses `args` as the arguments of the command `name`.
///
/// # Errors
///
/// Returns a [`CommandError`] with clap's rendered message on usage errors,
/// or when the help text cannot be written.
///
/// # Example
///
/// ```
/// use clap::Parser;
/// use eckmuhl_command::args::{Parsed, parse};
///
/// #[derive(Parser)]
/// struct Args {
///     #[arg(long)]
///     force: bool,
/// }
///
/// let mut out = Vec::new();
/// let parsed = parse::<Args, _>("deploy", &["--force".to_owned()], &mut out)
///     .expect("valid arguments");
/// assert!(matches!(parsed, Parsed::Args(Args { force: true })));
///
/// let parsed = parse::<Args, _>("deploy", &["--help".to_owned()], &mut out)
///     .expect("help is not an error");
/// assert!(matches!(parsed, Parsed::Stop));
/// assert!(String::from_utf8_lossy(&out).contains("Usage: deploy"));
/// ```
pub fn parse<T, W>(name: &str, args: &[String], out: &mut W) -> Result<Parsed<T>, CommandError>
where
    T: Parser,
    W: Write,
{
    let argv = std::iter::once(name).chain(args.iter().map(String::as_str));
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Parsed::Args(parsed)),
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", error.render())?;
            out.flush()?;
            Ok(Parsed::Stop)
        }
        Err(error) => Err(CommandError::new(error.render().to_string().trim_end())),
    }
}
