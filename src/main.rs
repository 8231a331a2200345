use argh::FromArgs;
use jobshell::config::Config;
use jobshell::{Interpreter, logging, signals};
use std::path::PathBuf;

#[derive(FromArgs)]
/// Interactive shell with two-stage pipelines, append redirection and background jobs.
struct Args {
    #[argh(option)]
    /// configuration file used instead of ~/.config/jobshell/config.toml
    config: Option<PathBuf>,

    #[argh(option)]
    /// file that receives diagnostic logs
    log_file: Option<PathBuf>,

    #[argh(switch, short = 'v')]
    /// log at debug level
    verbose: bool,

    #[argh(option, short = 'c')]
    /// run this line, then exit
    command: Option<String>,
}

fn main() {
    let args: Args = argh::from_env();
    let config = Config::load(args.config.as_deref());
    logging::init(&config, args.log_file, args.verbose);

    if let Err(e) = signals::ignore_interactive_signals() {
        log::warn!("could not ignore interactive signals: {e}");
    }

    let mut interpreter = Interpreter::from_config(&config);
    match args.command {
        Some(line) => interpreter.run_once(&line),
        None => {
            if config.banner {
                println!(" ~ jobshell ~");
            }
            interpreter.repl()
        }
    }
}
