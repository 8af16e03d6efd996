use std::fs::OpenOptions;

use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode, WriteLogger};

use super::CliError;
use crate::config::{Config, ConfigError};

/// Installs the global logger.
///
/// Logs go to `log.file` when configured, otherwise to stderr. Nothing is
/// installed when the resulting level is `off`.
pub fn init(config: &Config, verbosity: u8, quiet: bool) -> Result<(), CliError> {
    let level = level(config, verbosity, quiet)?;
    if level == LevelFilter::Off {
        return Ok(());
    }

    let log_config = simplelog::Config::default();
    match config.log_path() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| CliError::Open { path, source })?;
            WriteLogger::init(level, log_config, file)?;
        }
        None => TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    Ok(())
}

/// `--quiet` wins, then `-v`/`-vv`, then the configured level.
pub fn level(config: &Config, verbosity: u8, quiet: bool) -> Result<LevelFilter, ConfigError> {
    if quiet {
        return Ok(LevelFilter::Off);
    }
    match verbosity {
        0 => config.level_filter(),
        1 => Ok(LevelFilter::Debug),
        _ => Ok(LevelFilter::Trace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_precedence() {
        let config = Config::defaults().unwrap();
        assert_eq!(level(&config, 0, false).unwrap(), LevelFilter::Warn);
        assert_eq!(level(&config, 1, false).unwrap(), LevelFilter::Debug);
        assert_eq!(level(&config, 3, false).unwrap(), LevelFilter::Trace);
        assert_eq!(level(&config, 2, true).unwrap(), LevelFilter::Off);
    }
}
