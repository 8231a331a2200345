use std::io;
use std::path::PathBuf;

/// Failures detected while turning a command segment into running processes.
///
/// None of these end the session: the router reports them and moves on to the
/// next segment.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("empty command")]
    EmptyCommand,

    #[error("expected a file name after '>'")]
    MissingRedirectTarget,

    #[error("expected a command on both sides of '|'")]
    MissingPipeStage,

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create pipe: {0}")]
    Pipe(#[from] nix::errno::Errno),

    #[error("cannot open {}: {source}", path.display())]
    RedirectTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for process {pid}: {source}")]
    Wait {
        pid: u32,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
