use crate::interpreter::DEFAULT_PROMPT;
use crate::search_path::DEFAULT_PREFIXES;
use crate::session::DEFAULT_DRAIN_CHUNK_SIZE;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Location of the user overlay, relative to `$HOME`.
const USER_CONFIG: &str = ".config/jobshell/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub prompt: String,
    #[serde(default)]
    pub banner: bool,
    pub search_path: Vec<String>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    pub drain_chunk_size: usize,
}

/// User-supplied values; every key is optional and overrides the default when set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    prompt: Option<String>,
    banner: Option<bool>,
    search_path: Option<Vec<String>>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    drain_chunk_size: Option<usize>,
}

impl Config {
    /// Load the default embedded configuration.
    ///
    /// Falls back to [`Config::builtin`] if the embedded file does not parse.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            eprintln!("jobshell: embedded config parse error: {e}");
            Self::builtin()
        })
    }

    /// Defaults assembled from the crate's constants, without any file.
    pub fn builtin() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            banner: true,
            search_path: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            log_level: Some("warn".to_string()),
            log_file: None,
            drain_chunk_size: DEFAULT_DRAIN_CHUNK_SIZE,
        }
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Apply the overlay from `explicit` if given, else from ~/.config/jobshell/config.toml
    ///
    /// A missing user file is not an error. A malformed one is reported on stderr
    /// and ignored.
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay(explicit) {
            config.apply_overlay(overlay);
        }
        config
    }

    fn load_overlay(explicit: Option<&Path>) -> Option<ConfigOverlay> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Path::new(&std::env::var_os("HOME")?).join(USER_CONFIG),
        };
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                if explicit.is_some() {
                    eprintln!("jobshell: cannot read {}: {e}", path.display());
                }
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("jobshell: config parse error in {}: {e}", path.display());
                None
            }
        }
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(v) = overlay.prompt {
            self.prompt = v;
        }
        if let Some(v) = overlay.banner {
            self.banner = v;
        }
        if let Some(v) = overlay.search_path {
            self.search_path = v;
        }
        if let Some(v) = overlay.log_level {
            self.log_level = Some(v);
        }
        if let Some(v) = overlay.log_file {
            self.log_file = Some(v);
        }
        if let Some(v) = overlay.drain_chunk_size {
            self.drain_chunk_size = v.max(1);
        }
    }

    /// Configured log level, `warn` when unset or unrecognized.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(LevelFilter::Warn)
    }
}
