//! A small interactive shell with pipes, append redirection and background jobs.
//!
//! Each input line is split into `;`-separated segments. A segment is classified
//! into a [`Job`] by its structural markers (a trailing `&`, a `>` or a `|`) and
//! then run either as a built-in inside the shell or as one or two external
//! programs found through the session's [`SearchList`].
//!
//! The main entry point is [`Interpreter`], which owns the [`Session`] state and
//! drives the read loop. The public modules expose the individual stages so they
//! can be used and tested on their own.

mod builtin;
pub mod command;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod external;
mod interpreter;
pub mod jobs;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod search_path;
pub mod session;
pub mod signals;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, Step};
pub use parser::Job;
pub use search_path::SearchList;
pub use session::Session;
