use crate::config::Config;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Default log file, relative to `$HOME`.
const DEFAULT_LOG_FILE: &str = ".local/share/jobshell/jobshell.log";

/// Route `log` records to a file so they never mix with program output on the terminal.
///
/// Best-effort: when the file cannot be opened the shell simply runs without a logger.
pub fn init(config: &Config, log_file: Option<PathBuf>, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        config.log_level()
    };
    let Some(path) = log_file
        .or_else(|| config.log_file.clone())
        .or_else(default_log_path)
    else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let log_config = ConfigBuilder::new().set_thread_level(LevelFilter::Off).build();
    if WriteLogger::init(level, log_config, file).is_ok() {
        log::debug!("logging to {} at {level}", path.display());
    }
}

fn default_log_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(Path::new(&home).join(DEFAULT_LOG_FILE))
}
