//! Command capability shared by the eckmuhl host and its plugins.
//!
//! A plugin is a dynamic library named `<host>.<command>.<suffix>` that
//! exports a [`CommandDeclaration`] under the symbol [`EXPORT_SYMBOL`]. The
//! host verifies the declaration, calls its factory once, and runs the
//! resulting [`Command`] with the arguments that follow the command name.
//!
//! # Example
//!
//! ```rust
//! use eckmuhl_command::{Command, CommandResult, Outcome, export_command};
//!
//! struct Hello;
//!
//! impl Command for Hello {
//!     fn run(&mut self, args: &[String]) -> CommandResult {
//!         if args.iter().any(|arg| arg == "--quiet") {
//!             return Ok(Outcome::Stopped);
//!         }
//!         Ok(Outcome::Completed)
//!     }
//! }
//!
//! fn hello() -> Box<dyn Command> {
//!     Box::new(Hello)
//! }
//!
//! export_command!(hello);
//!
//! let factory = Export.verify().expect("declaration matches this build");
//! let mut command = factory();
//! assert_eq!(command.run(&[]).expect("runs"), Outcome::Completed);
//! ```

pub mod abi;
pub mod args;
mod command;
mod error;
mod guard;

pub use self::abi::{
    ABI_VERSION, COMPILER_FINGERPRINT, CommandDeclaration, CommandFactory, DeclarationHeader,
    DeclarationMismatch, EXPORT_SYMBOL, EXPORT_SYMBOL_NUL, UNKNOWN_FINGERPRINT,
};
pub use self::command::{Command, CommandResult, Outcome};
pub use self::error::CommandError;
pub use self::guard::Guarded;

/// Declares the `Export` symbol the eckmuhl host resolves in a plugin.
///
/// The argument is a `fn() -> Box<dyn Command>` (a path or a non-capturing
/// closure). The exported factory wraps it in [`Guarded`] so panics stay on
/// the plugin side. Invoke the macro once, at the root of a `cdylib` crate.
#[macro_export]
macro_rules! export_command {
    ($factory:expr) => {
        /// Command declaration resolved by the eckmuhl host.
        #[unsafe(no_mangle)]
        pub static Export: $crate::CommandDeclaration = $crate::CommandDeclaration::new({
            fn guarded() -> ::std::boxed::Box<dyn $crate::Command> {
                $crate::Guarded::build($factory)
            }
            guarded
        });
    };
}
