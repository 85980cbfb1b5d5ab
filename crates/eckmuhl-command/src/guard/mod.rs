//! Panic containment on the plugin side of the module boundary.
//!
//! A plugin links its own copy of the standard library, so a panic raised in
//! plugin code cannot be caught by the host. [`Guarded`] catches it where it
//! happens and turns it into an ordinary [`CommandError`]. The
//! [`export_command!`](crate::export_command) macro wraps every exported
//! factory with it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::abi::CommandFactory;
use crate::command::{Command, CommandResult};
use crate::error::CommandError;

/// A command whose construction and execution cannot unwind.
pub struct Guarded {
    inner: Result<Box<dyn Command>, String>,
}

impl Guarded {
    /// Calls `factory` and wraps the command it returns.
    ///
    /// A panicking factory yields a command that fails when run.
    #[must_use]
    pub fn build(factory: CommandFactory) -> Box<dyn Command> {
        let inner = panic::catch_unwind(factory).map_err(|payload| panic_message(payload.as_ref()));
        Box::new(Self { inner })
    }
}

impl Command for Guarded {
    fn run(&mut self, args: &[String]) -> CommandResult {
        let command = match &mut self.inner {
            Ok(command) => command,
            Err(message) => {
                return Err(CommandError::new(format!(
                    "command could not be created: {message}"
                )));
            }
        };
        panic::catch_unwind(AssertUnwindSafe(|| command.run(args))).unwrap_or_else(|payload| {
            Err(CommandError::new(format!(
                "command panicked: {}",
                panic_message(payload.as_ref())
            )))
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_else(|| String::from("unknown panic payload"))
}
