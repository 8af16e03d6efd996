pub mod ast;
pub mod builtins;
pub mod config;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod output;
pub mod parser;
pub mod path;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Program, Token, TokenKind};
pub use builtins::BuiltinTable;
pub use config::{Config, ConfigError};
pub use environment::Environment;
pub use evaluator::{EvalError, Evaluator};
pub use lexer::Lexer;
pub use object::{Object, ObjectType};
pub use output::{render, Rendered};
pub use parser::{parse, ParseError, Parser};
pub use path::FieldPath;
