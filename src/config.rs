use std::{
    env, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::{warn, LevelFilter};
use serde::Deserialize;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Location of the user overlay, relative to the home directory.
const USER_CONFIG: &str = ".config/jsonsh/config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub shell: ShellConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShellConfig {
    pub banner: bool,
    pub color: bool,
    pub history_file: String,
    pub history_size: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogConfig {
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

// ── Overlay types: every key optional, set keys win ──

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    #[serde(default)]
    shell: ShellOverlay,
    #[serde(default)]
    log: LogOverlay,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ShellOverlay {
    banner: Option<bool>,
    color: Option<bool>,
    history_file: Option<String>,
    history_size: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LogOverlay {
    level: Option<String>,
    file: Option<String>,
}

/// Errors that can occur while loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The file is not valid TOML for this schema
    Toml(toml::de::Error),
    /// `log.level` is not a level name
    InvalidLevel(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Toml(e) => write!(f, "invalid config: {}", e),
            ConfigError::InvalidLevel(level) => write!(
                f,
                "invalid log level '{}' (expected off, error, warn, info, debug or trace)",
                level
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml(e) => Some(e),
            ConfigError::InvalidLevel(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

impl Config {
    /// The built-in defaults.
    pub fn defaults() -> Result<Self, ConfigError> {
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }

    /// Defaults overlaid with `explicit` when given, else with the user
    /// config file if one exists.
    ///
    /// An explicit file that cannot be loaded is an error. A broken user
    /// file is reported with `warn!` and skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::defaults()?;

        if let Some(path) = explicit {
            config.apply_file(path)?;
        } else if let Some(path) = Self::user_config_path()
            && path.is_file()
            && let Err(e) = config.apply_file(&path)
        {
            warn!("ignoring {}: {}", path.display(), e);
        }

        config.level_filter()?;
        Ok(config)
    }

    /// `~/.config/jsonsh/config.toml`, when a home directory is known.
    pub fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(USER_CONFIG))
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply_overlay_str(&content)
    }

    /// Overlays the keys set in `toml_str`; unset keys keep their value.
    pub fn apply_overlay_str(&mut self, toml_str: &str) -> Result<(), ConfigError> {
        let overlay: ConfigOverlay = toml::from_str(toml_str)?;
        self.apply_overlay(overlay);
        Ok(())
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.shell;
        if let Some(v) = s.banner {
            self.shell.banner = v;
        }
        if let Some(v) = s.color {
            self.shell.color = v;
        }
        if let Some(v) = s.history_file {
            self.shell.history_file = v;
        }
        if let Some(v) = s.history_size {
            self.shell.history_size = v;
        }

        let l = overlay.log;
        if let Some(v) = l.level {
            self.log.level = v;
        }
        if let Some(v) = l.file {
            self.log.file = Some(v);
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log.level)
            .map_err(|_| ConfigError::InvalidLevel(self.log.level.clone()))
    }

    /// The history file with `~` expanded; `None` when persistence is off.
    pub fn history_path(&self) -> Option<PathBuf> {
        expand_home(&self.shell.history_file)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log.file.as_deref().and_then(expand_home)
    }
}

/// `HOME`, falling back to `USERPROFILE`; unset or empty means unknown.
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

fn expand_home(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        return None;
    }
    if raw == "~" {
        return home_dir();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(raw)),
    }
}
