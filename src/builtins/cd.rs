use std::{env, path::PathBuf};

use log::debug;

use super::string_arg;
use crate::{config::home_dir, evaluator::EvalError, object::Object};

/// `cd [dir]`
///
/// Changes the process working directory; with no argument, to the home
/// directory. Ignores pipeline input.
pub fn builtin_cd(_input: Option<&Object>, args: &[Object]) -> Object {
    cd(args).unwrap_or_else(Object::from)
}

fn cd(args: &[Object]) -> Result<Object, EvalError> {
    let target = match args {
        [] => home_dir().ok_or(EvalError::HomeNotFound)?,
        [dir] => PathBuf::from(string_arg("cd", dir)?),
        _ => return Err(EvalError::TooManyArguments("cd")),
    };

    env::set_current_dir(&target).map_err(|e| EvalError::Builtin {
        builtin: "cd",
        message: format!("{}: {}", target.display(), e),
    })?;
    debug!("working directory is now {}", target.display());

    Ok(Object::Null)
}
