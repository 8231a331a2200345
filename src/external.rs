//! Process creation for commands that are not built-ins.
//!
//! Every function here resolves the program through the session's
//! [`SearchList`], spawns it with the requested stream wiring and either waits
//! for that specific child or hands it over to the [`JobRegistry`]. A child
//! that is not registered is always waited on before the function returns.
//!
//! [`JobRegistry`]: crate::jobs::JobRegistry

use crate::command::ExitCode;
use crate::endpoints::{CommEndpoints, ReadEnd, WriteEnd};
use crate::error::ShellError;
use crate::search_path::SearchList;
use crate::session::Session;
use crate::signals;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, Command, ExitStatus};

/// Permission bits of a redirect target created by the shell.
pub const REDIRECT_FILE_MODE: u32 = 0o644;

/// How a child's standard streams are connected.
#[derive(Debug)]
pub enum Wiring {
    /// Both streams are inherited from the shell.
    Inherit,
    /// Standard output goes to the given end.
    Stdout(WriteEnd),
    /// Standard input comes from the given end.
    Stdin(ReadEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Block until the spawned child terminates.
    Synchronous,
    /// Register the child in the session's job registry and return at once.
    Background,
}

/// What happened to a launched child by the time `launch` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launched {
    Exited(ExitCode),
    Detached { index: usize, pid: u32 },
}

/// Resolve, spawn and then wait for or register one program.
///
/// The wiring's endpoint is moved into the child and the parent's copy is
/// closed right after spawning, before any wait.
pub fn launch(
    session: &mut Session,
    tokens: &[String],
    wiring: Wiring,
    wait: WaitMode,
) -> Result<Launched, ShellError> {
    match wait {
        WaitMode::Synchronous => launch_foreground(session, tokens, wiring).map(Launched::Exited),
        WaitMode::Background => {
            let (index, pid) = launch_background(session, tokens, wiring)?;
            Ok(Launched::Detached { index, pid })
        }
    }
}

/// Spawn one program and wait for it.
pub fn launch_foreground(
    session: &Session,
    tokens: &[String],
    wiring: Wiring,
) -> Result<ExitCode, ShellError> {
    let command = prepare(&session.search_list, tokens)?;
    wait_for(spawn(command, wiring)?)
}

/// Spawn one program and register it as a background job.
///
/// Returns the job index and the child's pid.
pub fn launch_background(
    session: &mut Session,
    tokens: &[String],
    wiring: Wiring,
) -> Result<(usize, u32), ShellError> {
    let command = prepare(&session.search_list, tokens)?;
    let child = spawn(command, wiring)?;
    let pid = child.id();
    let index = session.jobs.register(child);
    Ok((index, pid))
}

/// Run `tokens` with standard output appended to `target`.
///
/// The parent drains the producer's output until end-of-stream and only then
/// waits for it, so a full pipe buffer never blocks the producer.
pub fn launch_redirected(
    session: &Session,
    tokens: &[String],
    target: &Path,
) -> Result<ExitCode, ShellError> {
    let command = prepare(&session.search_list, tokens)?;
    let mut file = open_append(target)?;

    let (producer_output, drain_input) = CommEndpoints::pipe()?.split_for_write();
    let child = spawn(command, Wiring::Stdout(producer_output))?;

    let drained = drain_until_nul(drain_input.into_reader(), &mut file, session.drain_chunk_size);
    let code = wait_for(child)?;
    let copied = drained?;
    log::debug!("appended {copied} bytes to {}", target.display());
    Ok(code)
}

/// Run `producer | consumer` and return the consumer's exit code.
///
/// Both programs are resolved before anything is spawned and both are spawned
/// before either is waited on.
pub fn launch_pipeline(
    session: &Session,
    producer: &[String],
    consumer: &[String],
) -> Result<ExitCode, ShellError> {
    if producer.is_empty() || consumer.is_empty() {
        return Err(ShellError::MissingPipeStage);
    }
    let producer_command = prepare(&session.search_list, producer)?;
    let consumer_command = prepare(&session.search_list, consumer)?;

    let (consumer_input, producer_output) = CommEndpoints::pipe()?.split_for_read();
    let producer_child = spawn(producer_command, Wiring::Stdout(producer_output))?;
    let consumer_child = match spawn(consumer_command, Wiring::Stdin(consumer_input)) {
        Ok(child) => child,
        Err(e) => {
            wait_for(producer_child)?;
            return Err(e);
        }
    };

    let producer_code = wait_for(producer_child)?;
    let consumer_code = wait_for(consumer_child)?;
    log::debug!("pipeline finished: producer {producer_code}, consumer {consumer_code}");
    Ok(consumer_code)
}

/// Copy `source` into `sink` chunk by chunk until end-of-stream.
///
/// Each chunk is cut at its first zero byte and the rest of that chunk is
/// dropped, so only plain text survives the copy. Returns the number of bytes
/// written.
pub fn drain_until_nul(
    mut source: impl Read,
    sink: &mut impl Write,
    chunk_size: usize,
) -> io::Result<u64> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut copied = 0u64;
    loop {
        let read = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let chunk = &buffer[..read];
        let text = match chunk.iter().position(|&byte| byte == 0) {
            Some(nul) => &chunk[..nul],
            None => chunk,
        };
        sink.write_all(text)?;
        copied += text.len() as u64;
    }
    sink.flush()?;
    Ok(copied)
}

/// Resolve `tokens[0]` and build the command with the full token sequence as its argument vector.
fn prepare(search_list: &SearchList, tokens: &[String]) -> Result<Command, ShellError> {
    let (name, args) = tokens.split_first().ok_or(ShellError::EmptyCommand)?;
    let Some(path) = search_list.resolve(name) else {
        log::debug!("{name} not found in {search_list}");
        return Err(ShellError::CommandNotFound(name.clone()));
    };

    let mut command = Command::new(&path);
    command.arg0(name).args(args);
    signals::restore_defaults_in_child(&mut command);
    Ok(command)
}

fn spawn(mut command: Command, wiring: Wiring) -> Result<Child, ShellError> {
    match wiring {
        Wiring::Inherit => {}
        Wiring::Stdout(end) => {
            command.stdout(end);
        }
        Wiring::Stdin(end) => {
            command.stdin(end);
        }
    }

    let program = command.get_program().to_string_lossy().into_owned();
    let child = command
        .spawn()
        .map_err(|source| ShellError::Spawn { program: program.clone(), source })?;
    // The command still holds the parent's copy of the wired end.
    drop(command);
    log::debug!("spawned {program} as pid {}", child.id());
    Ok(child)
}

/// Wait for this specific child, not any child.
fn wait_for(mut child: Child) -> Result<ExitCode, ShellError> {
    let pid = child.id();
    let status = child
        .wait()
        .map_err(|source| ShellError::Wait { pid, source })?;
    Ok(match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    })
}

fn open_append(target: &Path) -> Result<File, ShellError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(REDIRECT_FILE_MODE)
        .open(target)
        .map_err(|source| ShellError::RedirectTarget {
            path: target.to_path_buf(),
            source,
        })
}

fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = exit_status.signal() {
        128 + signal
    } else if exit_status.core_dumped() {
        255
    } else {
        -1
    }
}
