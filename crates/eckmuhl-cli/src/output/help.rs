use std::io::{self, Write};

const DOUBLE_RULE: &str =
    "================================================================================";
const SINGLE_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Name of the built-in listed beside the discovered plugins.
const VERSION_COMMAND: &str = "version";

/// Writes the help screen for `app` listing `commands` plus `version`.
///
/// Names are sorted and listed once each.
pub(crate) fn write_help<'a, W, I>(out: &mut W, app: &str, commands: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = commands.into_iter().collect();
    names.push(VERSION_COMMAND);
    names.sort_unstable();
    names.dedup();

    writeln!(out)?;
    writeln!(out, "The command line client")?;
    writeln!(out, "{DOUBLE_RULE}")?;
    writeln!(out, "Usage: {app} [command [options]]")?;
    writeln!(out)?;
    writeln!(out, "Available commands:")?;
    for name in names {
        writeln!(out, "  {name}")?;
    }
    writeln!(out, "{SINGLE_RULE}")?;
    writeln!(
        out,
        "  Use '{app} [command] --help' for more information about a command."
    )?;
    writeln!(out, "{DOUBLE_RULE}")?;
    writeln!(out)?;
    out.flush()
}
