use std::fmt;

use crate::ast::{Node, Token};

/// A name: variable, command, bare word or dotted field path.
///
/// # Examples
/// ```text
/// ls
/// -la
/// .data.items
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Identifier { token, value }
    }
}

/// A quoted string.
///
/// # Example
/// ```text
/// "hello world"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

/// A command name followed by whitespace-separated arguments.
///
/// # Example
/// ```text
/// where .age > 30
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommandExpression {
    /// The token naming the command
    pub token: Token,
    pub name: Identifier,
    pub args: Vec<Expression>,
}

/// Two expressions joined by `|`; the left result feeds the right.
///
/// Chains nest to the right: `a | b | c` is `a | (b | c)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineExpression {
    /// The `|` token
    pub token: Token,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// Abstract Syntax Tree node for anything that evaluates to an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    Command(CommandExpression),
    Pipeline(PipelineExpression),
}

impl Node for Expression {
    fn token(&self) -> Option<&Token> {
        Some(match self {
            Expression::Identifier(ident) => &ident.token,
            Expression::StringLiteral(lit) => &lit.token,
            Expression::Command(cmd) => &cmd.token,
            Expression::Pipeline(pipe) => &pipe.token,
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.token.literal)
    }
}

impl fmt::Display for CommandExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl fmt::Display for PipelineExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} | {})", self.left, self.right)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => ident.fmt(f),
            Expression::StringLiteral(lit) => lit.fmt(f),
            Expression::Command(cmd) => cmd.fmt(f),
            Expression::Pipeline(pipe) => pipe.fmt(f),
        }
    }
}
