//! # jsonsh - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the jsonsh command
//! language: a small layer of variable bindings and pipelines on top of
//! ordinary process invocation, with builtins that understand JSON.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (identifiers, strings, commands, pipelines)
//! - **[statements]** - `let` bindings and expression statements
//! - **[program]** - The root node for one line of input
//!
//! ## Quick Start
//!
//! ```text
//! let users = cat users.json
//! users | where .age > 30 | select .name .email
//! ```
//!
//! The first line binds the parsed output of `cat` to `users`; the second
//! filters and projects it.
//!
//! ## Core Concepts
//!
//! ### Commands
//!
//! A command is a name followed by whitespace-separated words. Names that are
//! bound variables substitute their value, builtins (`cd`, `get`, `where`,
//! `select`) run in-process, everything else is spawned as a program.
//!
//! ### Pipelines
//!
//! ```text
//! curl -s https://api.example.com/items | get .data | where .price < 10
//! ```
//!
//! Each stage runs to completion; its whole result becomes the next stage's
//! input.
//!
//! ### Field Paths
//!
//! Dotted words such as `.data.items` name a path through nested JSON
//! objects. The lexer keeps them as a single identifier.
//!
//! ## Reconstruction
//!
//! Every node implements [`Display`](std::fmt::Display), producing source
//! text that reads back to an equivalent tree. Pipelines are parenthesised to
//! show their nesting:
//!
//! ```text
//! (ls -l | (grep foo | wc -l))
//! ```
pub mod expressions;
pub mod program;
pub mod statements;
pub mod tokens;

pub use expressions::{CommandExpression, Expression, Identifier, PipelineExpression, StringLiteral};
pub use program::Program;
pub use statements::{ExpressionStatement, LetStatement, Statement};
pub use tokens::{Token, TokenKind};

/// Capabilities shared by every AST node.
pub trait Node: std::fmt::Display {
    /// The token the node was built from; `None` only for an empty program.
    fn token(&self) -> Option<&Token>;

    fn token_literal(&self) -> &str {
        self.token().map(|t| t.literal.as_str()).unwrap_or("")
    }
}
