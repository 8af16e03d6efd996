use std::fmt;

use crate::ast::{Expression, Identifier, Node, Token};

/// Variable binding.
///
/// # Example
/// ```text
/// let users = cat users.json
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    /// The `let` token
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

/// A bare expression used as a statement, usually a command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// First token of the expression
    pub token: Token,
    pub expression: Expression,
}

/// One statement of a [`Program`](crate::ast::Program).
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Expression(ExpressionStatement),
}

impl Node for Statement {
    fn token(&self) -> Option<&Token> {
        Some(match self {
            Statement::Let(stmt) => &stmt.token,
            Statement::Expression(stmt) => &stmt.token,
        })
    }
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.token.literal, self.name, self.value)
    }
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expression.fmt(f)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => stmt.fmt(f),
            Statement::Expression(stmt) => stmt.fmt(f),
        }
    }
}
