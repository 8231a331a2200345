use crate::session::Session;
use anyhow::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; a positive value is a command's own failure code.
/// Negative values never come from a program: they mark a segment the shell
/// could not run at all.
pub type ExitCode = i32;

/// Status of a segment that failed before or while starting its processes.
pub const FAILURE_STATUS: ExitCode = -1;

/// Object-safe trait for a command that runs inside the shell process.
pub trait ExecutableCommand {
    /// Executes the command, writing its output to `stdout`.
    fn execute(self: Box<Self>, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
