//! Reference eckmuhl plugin printing its arguments.
//!
//! Installed beside the host as `eckmuhl.echo.<ext>`, it answers
//! `eckmuhl echo [-n] [--fail MESSAGE] [WORDS]...`. Help and version flags
//! stop the host cleanly; `--fail` reports a command failure.

use std::io::{self, Write};

use clap::Parser;
use eckmuhl_command::args::{Parsed, parse};
use eckmuhl_command::{Command, CommandError, CommandResult, Outcome, export_command};

#[derive(Debug, Parser)]
#[command(name = "echo", about = "Print the given words", version)]
struct EchoArgs {
    /// Do not print the trailing newline.
    #[arg(short = 'n')]
    no_newline: bool,
    /// Fail with MESSAGE instead of printing.
    #[arg(long, value_name = "MESSAGE")]
    fail: Option<String>,
    /// Words to print, separated by single spaces.
    #[arg(trailing_var_arg = true)]
    words: Vec<String>,
}

/// The `echo` command, writing to `W`.
#[derive(Debug)]
pub struct Echo<W> {
    out: W,
}

impl<W: Write> Echo<W> {
    /// Creates the command writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Command for Echo<W> {
    fn run(&mut self, args: &[String]) -> CommandResult {
        let parsed = match parse::<EchoArgs, _>("echo", args, &mut self.out)? {
            Parsed::Args(values) => values,
            Parsed::Stop => return Ok(Outcome::Stopped),
        };
        if let Some(message) = parsed.fail {
            return Err(CommandError::new(message));
        }

        write!(self.out, "{}", parsed.words.join(" "))?;
        if !parsed.no_newline {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(Outcome::Completed)
    }
}

fn echo() -> Box<dyn Command> {
    Box::new(Echo::new(io::stdout()))
}

export_command!(echo);
