use clap::{ArgAction, Parser as ClapParser};
use jsonsh::{
    cli::{self, CliError, Session},
    Config,
};
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

#[derive(ClapParser)]
#[command(name = "jsonsh")]
#[command(about = "An interactive shell with let bindings, pipelines and JSON-aware builtins")]
#[command(version)]
struct Cli {
    /// Run one line and exit
    #[arg(short = 'c', long = "command", conflicts_with = "script")]
    command: Option<String>,

    /// Run a script line by line
    script: Option<PathBuf>,

    /// Config file to use instead of ~/.config/jsonsh/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// No logging at all
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    match run(Cli::parse()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("jsonsh: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the last line that ran succeeded.
fn run(args: Cli) -> Result<bool, CliError> {
    let config = Config::load(args.config.as_deref())?;
    cli::logging::init(&config, args.verbose, args.quiet)?;

    let mut session = Session::new();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if let Some(line) = args.command {
        let outcome = session.run_line(&line, &mut stdout, &mut stderr)?;
        return Ok(!outcome.is_failure());
    }

    if let Some(path) = args.script {
        let file = File::open(&path).map_err(|source| CliError::Open { path, source })?;
        return Ok(session.run_script(BufReader::new(file), &mut stdout, &mut stderr)?);
    }

    if atty::is(atty::Stream::Stdin) {
        cli::repl::run(&mut session, &config)?;
        Ok(true)
    } else {
        let stdin = io::stdin();
        Ok(session.run_script(stdin.lock(), &mut stdout, &mut stderr)?)
    }
}
