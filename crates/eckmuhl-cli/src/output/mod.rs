//! Text written by the built-in `help` and `version` commands.

mod help;
mod version;

pub(crate) use help::write_help;
pub(crate) use version::write_version;
