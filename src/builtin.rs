use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::interpreter::Factory;
use crate::session::Session;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;

/// Name under which the search list is printed and assigned.
pub const PATH_VARIABLE: &str = "$PATH";

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process. They are only considered for
/// plain jobs, never for background, redirected or piped ones.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "pwd".
    fn name() -> &'static str;

    /// Whether a first token selects this command. Exact match unless overridden.
    fn matches(name: &str) -> bool {
        name == Self::name()
    }

    /// Executes the command, writing to `stdout` and updating `session`.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        match <T as BuiltinCommand>::execute(*self, stdout, session) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(stdout, "{e:#}")?;
                Ok(1)
            }
        }
    }
}

/// Usage or help text produced while parsing a builtin's arguments.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        if !self.output.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if T::matches(name) {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Print the current working directory followed by a trailing slash.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(self, stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        let cwd = env::current_dir().context("pwd: cannot read the working directory")?;
        let mut shown = cwd.to_string_lossy().into_owned();
        if !shown.ends_with('/') {
            shown.push('/');
        }
        writeln!(stdout, "{shown}")?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Change the current working directory of the shell.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub dir: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        env::set_current_dir(&self.dir).with_context(|| format!("cd: {}", self.dir))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Append a directory to the list searched for programs.
pub struct A2path {
    #[argh(positional)]
    /// prefix tried after every existing one.
    pub dir: String,
}

impl BuiltinCommand for A2path {
    fn name() -> &'static str {
        "a2path"
    }

    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        session.search_list.push(self.dir);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the program search list, entries joined with ':'.
pub struct PathShow {}

impl BuiltinCommand for PathShow {
    fn name() -> &'static str {
        PATH_VARIABLE
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        writeln!(stdout, "{}", session.search_list)?;
        Ok(0)
    }
}

/// Append to the program search list: `$PATH=$PATH:<dir1>:<dir2>...`.
///
/// The whole assignment is a single token, so it arrives as the command name.
pub struct PathAssign {
    pub additions: Vec<String>,
}

impl PathAssign {
    fn usage() -> EarlyExit {
        EarlyExit {
            output: format!("usage: {PATH_VARIABLE}={PATH_VARIABLE}:<dir>[:<dir>...]"),
            status: Err(()),
        }
    }
}

impl FromArgs for PathAssign {
    fn from_args(command_name: &[&str], args: &[&str]) -> Result<Self, EarlyExit> {
        if !args.is_empty() {
            return Err(Self::usage());
        }
        let token = command_name.last().copied().unwrap_or_default();
        let value = token
            .strip_prefix(PATH_VARIABLE)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or_else(Self::usage)?;

        let mut segments = value.split(':');
        if segments.next() != Some(PATH_VARIABLE) {
            return Err(Self::usage());
        }
        Ok(Self {
            additions: segments.map(str::to_owned).collect(),
        })
    }
}

impl BuiltinCommand for PathAssign {
    fn name() -> &'static str {
        "$PATH="
    }

    fn matches(name: &str) -> bool {
        name.starts_with(Self::name())
    }

    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        for dir in self.additions {
            session.search_list.push(dir);
        }
        Ok(0)
    }
}
