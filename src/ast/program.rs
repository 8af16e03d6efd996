use std::fmt;

use crate::ast::{Node, Statement, Token};

/// Root of every parse: the statements of one input line, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn token(&self) -> Option<&Token> {
        self.statements.first().and_then(Node::token)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            stmt.fmt(f)?;
        }
        Ok(())
    }
}
