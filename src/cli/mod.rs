//! Front end for jsonsh
//!
//! [`Session`] owns the state of one shell session and turns input lines
//! into output. [`repl`] drives it from a line editor; the binary drives
//! it from `-c`, a script file or piped stdin.

pub mod logging;
pub mod repl;
mod session;

pub use session::{LineOutcome, Session};

use std::{io, path::PathBuf};

use rustyline::error::ReadlineError;

use crate::config::ConfigError;

/// Errors that can occur in the front end
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded
    Config(ConfigError),
    /// Line editor failure
    Readline(ReadlineError),
    /// A script or log file could not be opened
    Open { path: PathBuf, source: io::Error },
    /// The logger could not be installed
    Logger(log::SetLoggerError),
    /// IO error
    Io(io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "config error: {}", e),
            CliError::Readline(e) => write!(f, "line editor error: {}", e),
            CliError::Open { path, source } => {
                write!(f, "cannot open {}: {}", path.display(), source)
            }
            CliError::Logger(e) => write!(f, "cannot set up logging: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Readline(e) => Some(e),
            CliError::Open { source, .. } => Some(source),
            CliError::Logger(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<ReadlineError> for CliError {
    fn from(e: ReadlineError) -> Self {
        CliError::Readline(e)
    }
}

impl From<log::SetLoggerError> for CliError {
    fn from(e: log::SetLoggerError) -> Self {
        CliError::Logger(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
