use crate::command::{CommandFactory, ExitCode, FAILURE_STATUS};
use crate::config::Config;
use crate::endpoints::WriteEnd;
use crate::error::ShellError;
use crate::external::{self, Wiring};
use crate::lexer::{self, TokenSequence};
use crate::parser::{self, Job, Parsed};
use crate::search_path::SearchList;
use crate::session::Session;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};
use std::path::Path;

/// Prompt used when no configuration overrides it.
pub const DEFAULT_PROMPT: &str = "jobshell > ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only support commands defined in this crate, the builtins.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// What the read loop should do after a line or segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep reading. Carries the status of the last segment run.
    Continue(ExitCode),
    /// `exit` was entered; the session must shut down.
    Exit,
}

/// A minimal shell that runs lines of `;`-separated commands.
///
/// Every segment is classified into a [`Job`] and routed either to a built-in
/// or to the process launcher. The interpreter owns the [`Session`] for the
/// whole run and tears it down in [`Interpreter::shutdown`].
///
/// Example
/// ```
/// use jobshell::{Interpreter, Step};
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let step = sh.execute_line("$PATH=$PATH:/opt/bin; $PATH", &mut out);
/// assert_eq!(step, Step::Continue(0));
/// assert_eq!(String::from_utf8(out).unwrap(), ":/bin/:/usr/bin/:/opt/bin\n");
/// ```
pub struct Interpreter {
    session: Session,
    builtins: Vec<Box<dyn CommandFactory>>,
    prompt: String,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of built-in factories.
    pub fn new(session: Session, builtins: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            session,
            builtins,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Create an interpreter with the default built-ins and the configured search list and prompt.
    pub fn from_config(config: &Config) -> Self {
        let session = Session::new(SearchList::new(config.search_path.iter().cloned()))
            .with_drain_chunk_size(config.drain_chunk_size);
        let mut interpreter = Self::new(session, default_builtins());
        interpreter.prompt = config.prompt.clone();
        interpreter
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Run every segment of `line` in order.
    ///
    /// Built-in output and job notices go to `out`; external programs write to
    /// the shell's own standard streams. Segments after an `exit` are not run.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Step {
        let mut last = 0;
        for tokens in lexer::segments(line) {
            match self.execute(tokens, out) {
                Step::Continue(status) => last = status,
                Step::Exit => return Step::Exit,
            }
        }
        Step::Continue(last)
    }

    /// Classify and run one segment. Failures are reported and yield [`FAILURE_STATUS`].
    pub fn execute(&mut self, tokens: TokenSequence, out: &mut dyn Write) -> Step {
        let job = match parser::classify(tokens) {
            Parsed::Exit => return Step::Exit,
            Parsed::Run(job) => job,
        };
        log::debug!("routing {job:?}");
        match self.route(job, out) {
            Ok(status) => Step::Continue(status),
            Err(e) => {
                log::warn!("segment failed: {e:#}");
                eprintln!("jobshell: {e:#}");
                Step::Continue(FAILURE_STATUS)
            }
        }
    }

    fn route(&mut self, job: Job, out: &mut dyn Write) -> anyhow::Result<ExitCode> {
        match job {
            Job::Plain(tokens) => self.run_plain(&tokens, out),
            Job::Background(tokens) => {
                let sink = WriteEnd::null_sink()?;
                let (index, pid) =
                    external::launch_background(&mut self.session, &tokens, Wiring::Stdout(sink))?;
                writeln!(out, "[{index}] {pid}")?;
                Ok(0)
            }
            Job::Redirect(ref command, _) => {
                let target = job.redirect_target().ok_or(ShellError::MissingRedirectTarget)?;
                Ok(external::launch_redirected(&self.session, command, Path::new(target))?)
            }
            Job::Pipe(producer, consumer) => {
                Ok(external::launch_pipeline(&self.session, &producer, &consumer)?)
            }
        }
    }

    fn run_plain(&mut self, tokens: &[String], out: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(0);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        for factory in &self.builtins {
            if let Some(cmd) = factory.try_create(name, &args) {
                return cmd.execute(out, &mut self.session);
            }
        }

        Ok(external::launch_foreground(&self.session, tokens, Wiring::Inherit)?)
    }

    /// Read-eval loop over lines from the terminal (or piped standard input).
    ///
    /// Ctrl-C at the prompt discards the line. End of input, `exit` and
    /// unrecoverable read errors all end in [`Interpreter::shutdown`].
    pub fn repl(&mut self) -> ! {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                eprintln!("jobshell: cannot read input: {err}");
                self.shutdown()
            }
        };

        loop {
            match editor.readline(&self.prompt) {
                Ok(line) => {
                    if self.execute_line(&line, &mut io::stdout()) == Step::Exit {
                        self.shutdown()
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => self.shutdown(),
                Err(err) => {
                    log::error!("read error: {err}");
                    eprintln!("jobshell: {err}");
                    self.shutdown()
                }
            }
        }
    }

    /// Run a single line and shut down afterwards.
    pub fn run_once(&mut self, line: &str) -> ! {
        self.execute_line(line, &mut io::stdout());
        self.shutdown()
    }

    /// Print the exit notice, kill every background job and halt the process.
    ///
    /// Uses [`std::process::exit`], so destructors of outer scopes never run.
    pub fn shutdown(&mut self) -> ! {
        println!("\nExiting...");
        let signalled = self.session.jobs.terminate_all();
        log::info!("shutting down, {} background job(s) signalled", signalled.len());
        let _ = io::stdout().flush();
        log::logger().flush();
        std::process::exit(0)
    }
}

/// The built-ins every interactive session has.
pub(crate) fn default_builtins() -> Vec<Box<dyn CommandFactory>> {
    use crate::builtin::*;
    vec![
        Box::new(Factory::<Cd>::default()),
        Box::new(Factory::<Pwd>::default()),
        Box::new(Factory::<A2path>::default()),
        Box::new(Factory::<PathShow>::default()),
        Box::new(Factory::<PathAssign>::default()),
    ]
}

impl Default for Interpreter {
    /// Create an interpreter with the default search list and the built-ins
    /// `cd`, `pwd`, `a2path`, `$PATH` and `$PATH=...`.
    fn default() -> Self {
        Self::new(Session::default(), default_builtins())
    }
}
