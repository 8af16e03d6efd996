//! Interactive loop over a `rustyline` editor.

use std::{
    env, fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use log::warn;
use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

use super::{CliError, LineOutcome, Session};
use crate::config::{home_dir, Config};

const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Reads lines until Ctrl-D or `exit`, running each through `session`.
///
/// Ctrl-C abandons the current line. Evaluation errors are printed and
/// the loop carries on.
pub fn run(session: &mut Session, config: &Config) -> Result<(), CliError> {
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.shell.history_size)?
        .auto_add_history(false)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(editor_config)?;

    let history_path = config.history_path();
    if let Some(path) = &history_path
        && let Err(e) = rl.load_history(path)
    {
        let is_not_found =
            matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == ErrorKind::NotFound);
        if !is_not_found {
            warn!("failed to load history from {}: {}", path.display(), e);
        }
    }

    if config.shell.banner {
        println!("jsonsh {}. Type 'exit' or press Ctrl-D to quit.", env!("CARGO_PKG_VERSION"));
    }

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    loop {
        let prompt = prompt(config.shell.color);
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty()
                    && let Err(e) = rl.add_history_entry(line.as_str())
                {
                    warn!("failed to add history entry: {}", e);
                }
                if session.run_line(&line, &mut stdout, &mut stderr)? == LineOutcome::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                save_history(&mut rl, history_path.as_deref());
                return Err(e.into());
            }
        }
    }

    save_history(&mut rl, history_path.as_deref());
    Ok(())
}

fn save_history(rl: &mut Editor<(), DefaultHistory>, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("failed to create history directory: {}", e);
    }
    if let Err(e) = rl.save_history(path) {
        warn!("failed to save history to {}: {}", path.display(), e);
    }
}

fn prompt(color: bool) -> String {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("?"));
    format_prompt(&cwd, home_dir().as_deref(), color)
}

/// `<cwd> jsonsh > `, with the home directory shown as `~`.
pub fn format_prompt(cwd: &Path, home: Option<&Path>, color: bool) -> String {
    let dir = match home.and_then(|home| cwd.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => cwd.display().to_string(),
    };

    if color {
        format!("{CYAN}{dir}{RESET} {GREEN}jsonsh >{RESET} ")
    } else {
        format!("{dir} jsonsh > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_outside_home() {
        assert_eq!(
            format_prompt(Path::new("/tmp/work"), Some(Path::new("/home/ann")), false),
            "/tmp/work jsonsh > "
        );
    }

    #[test]
    fn test_prompt_abbreviates_home() {
        let home = Some(Path::new("/home/ann"));
        assert_eq!(format_prompt(Path::new("/home/ann"), home, false), "~ jsonsh > ");
        assert_eq!(
            format_prompt(Path::new("/home/ann/src/app"), home, false),
            "~/src/app jsonsh > "
        );
        // Sibling directory sharing a name prefix is not under home
        assert_eq!(
            format_prompt(Path::new("/home/anna"), home, false),
            "/home/anna jsonsh > "
        );
    }

    #[test]
    fn test_prompt_colors() {
        let prompt = format_prompt(Path::new("/srv"), None, true);
        assert_eq!(prompt, "\x1b[36m/srv\x1b[0m \x1b[32mjsonsh >\x1b[0m ");
    }
}
