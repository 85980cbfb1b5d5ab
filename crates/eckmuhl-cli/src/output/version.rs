use std::io::{self, Write};

use time::macros::format_description;

use crate::build_info::BuildInfo;

const RULE: &str = "-----------------------------------------------";

/// Writes the version block; `year` goes on the copyright line.
pub(crate) fn write_version<W: Write>(out: &mut W, build: &BuildInfo, year: i32) -> io::Result<()> {
    let built_at = build
        .built_at()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] +0000 UTC"
        ))
        .map_err(io::Error::other)?;

    writeln!(out)?;
    writeln!(out, "  eckmuhl")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  version  : {}", build.version())?;
    writeln!(out, "  built at : {built_at}")?;
    writeln!(out, "  by       : the eckmuhl authors © {year}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    out.flush()
}
