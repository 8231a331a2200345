//! Signal dispositions of the shell and of the children it starts.

use nix::sys::signal::{SigHandler, Signal, signal};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::Command;

/// Signals the shell ignores for its whole lifetime.
pub const INTERACTIVE_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTSTP];

/// Ignore interrupt and suspend for the calling process.
pub fn ignore_interactive_signals() -> nix::Result<()> {
    for sig in INTERACTIVE_SIGNALS {
        // SAFETY: SigIgn installs no handler function.
        unsafe { signal(sig, SigHandler::SigIgn) }?;
    }
    Ok(())
}

/// Make `command`'s child start with the default disposition for the interactive signals.
///
/// An ignored disposition survives exec, so without this every child would
/// inherit the shell's.
pub fn restore_defaults_in_child(command: &mut Command) {
    // SAFETY: the hook only calls sigaction, which is async-signal-safe.
    unsafe {
        command.pre_exec(reset_interactive_signals);
    }
}

fn reset_interactive_signals() -> io::Result<()> {
    for sig in INTERACTIVE_SIGNALS {
        // SAFETY: SigDfl installs no handler function.
        unsafe { signal(sig, SigHandler::SigDfl) }?;
    }
    Ok(())
}
