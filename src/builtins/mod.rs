//! Commands that run inside the interpreter instead of as child processes.
//!
//! | Name     | Input            | Arguments                   |
//! |----------|------------------|-----------------------------|
//! | `cd`     | ignored          | optional directory          |
//! | `get`    | JSON, required   | one field path              |
//! | `where`  | JSON, required   | field path, operator, value |
//! | `select` | JSON, required   | one or more field paths     |
//!
//! Contract violations come back as [`Object::Error`], never as panics.

mod cd;
mod compare;
mod filter;
mod get;
mod select;

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    evaluator::EvalError,
    object::{Builtin, BuiltinFn, Object},
};

pub use cd::builtin_cd;
pub use compare::{evaluate_condition, CompareOp};
pub use filter::builtin_where;
pub use get::builtin_get;
pub use select::builtin_select;

/// Name → builtin lookup, built once and handed to the
/// [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone)]
pub struct BuiltinTable {
    entries: HashMap<&'static str, Builtin>,
}

impl BuiltinTable {
    /// A table with no builtins; every command runs as a process.
    pub fn empty() -> Self {
        BuiltinTable {
            entries: HashMap::new(),
        }
    }

    /// `cd`, `get`, `where` and `select`.
    pub fn standard() -> Self {
        Self::empty()
            .with("cd", builtin_cd)
            .with("get", builtin_get)
            .with("where", builtin_where)
            .with("select", builtin_select)
    }

    /// Adds or replaces a builtin.
    pub fn with(mut self, name: &'static str, func: BuiltinFn) -> Self {
        self.entries.insert(name, Builtin { name, func });
        self
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Builtin names in alphabetical order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// The pipeline input as JSON, or the reason it cannot be used.
fn json_input<'a>(builtin: &'static str, input: Option<&'a Object>) -> Result<&'a Value, EvalError> {
    match input {
        None => Err(EvalError::MissingInput(builtin)),
        Some(Object::Json(value)) => Ok(value),
        Some(other) => Err(EvalError::InputNotJson {
            builtin,
            found: other.object_type(),
        }),
    }
}

fn string_arg<'a>(builtin: &'static str, arg: &'a Object) -> Result<&'a str, EvalError> {
    match arg {
        Object::String(s) => Ok(s),
        other => Err(EvalError::ArgumentType {
            builtin,
            found: other.object_type(),
        }),
    }
}
