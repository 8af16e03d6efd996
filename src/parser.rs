use log::trace;

use crate::{
    ast::{
        CommandExpression, Expression, ExpressionStatement, Identifier, LetStatement,
        PipelineExpression, Program, Statement, StringLiteral, Token, TokenKind,
    },
    lexer::Lexer,
};

/// A structural problem found while parsing.
///
/// Parsing never stops at the first error; every problem is collected and
/// the caller decides what to do with a program that has any.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The next token was not the one the grammar requires
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },

    /// `let name =` with nothing usable after the `=`
    MissingLetValue(String),

    /// A `|` with no valid expression on its left
    InvalidBeforePipe,

    /// A `|` with no valid expression on its right
    InvalidAfterPipe,

    /// A token that cannot begin an expression
    NoExpression(String),

    /// A control-flow keyword (`if`, `for`, ...) that has no grammar yet
    UnsupportedConstruct(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, found } => write!(
                f,
                "expected next token to be {}, got {} instead",
                expected, found
            ),
            ParseError::MissingLetValue(name) => write!(
                f,
                "no valid expression after '=' in let statement for '{}'",
                name
            ),
            ParseError::InvalidBeforePipe => write!(f, "invalid expression before pipe '|'"),
            ParseError::InvalidAfterPipe => {
                write!(f, "empty or invalid expression after pipe '|'")
            }
            ParseError::NoExpression(literal) => write!(
                f,
                "could not parse an expression starting with '{}'",
                literal
            ),
            ParseError::UnsupportedConstruct(keyword) => {
                write!(f, "'{}' is not supported", keyword)
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    /// Every error collected so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.current_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.is(kind)
    }

    /// Advances if the peek token has the expected kind; records an error
    /// and stays put otherwise.
    fn expect_peek(&mut self, expected: TokenKind) -> bool {
        if self.peek_is(expected) {
            self.next_token();
            true
        } else {
            self.errors.push(ParseError::UnexpectedToken {
                expected,
                found: self.peek_token.kind,
            });
            false
        }
    }

    /// Parses statements until EOF. Statements that fail to parse are left
    /// out and parsing resumes at the following token.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                trace!("parsed statement: {}", stmt);
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_token.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            kind if kind.is_control_flow() => {
                self.errors.push(ParseError::UnsupportedConstruct(
                    self.current_token.literal.clone(),
                ));
                // Nothing after the keyword can be interpreted either
                while !self.peek_is(TokenKind::Eof) {
                    self.next_token();
                }
                None
            }
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::new(self.current_token.clone());

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let Some(value) = self.parse_expression() else {
            self.errors.push(ParseError::MissingLetValue(name.value));
            return None;
        };

        Some(LetStatement { token, name, value })
    }

    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.current_token.clone();
        let expression = self.parse_expression()?;
        Some(ExpressionStatement { token, expression })
    }

    /// Parses a command or primary expression, then folds a following `|`
    /// into a right-nested pipeline.
    pub fn parse_expression(&mut self) -> Option<Expression> {
        let left = if self.current_token.kind.starts_command() {
            Some(Expression::Command(self.parse_command_expression()))
        } else {
            self.parse_primary_expression()
        };

        if !self.peek_is(TokenKind::Pipe) {
            return left;
        }

        let Some(left) = left else {
            self.errors.push(ParseError::InvalidBeforePipe);
            return None;
        };

        self.next_token();
        let token = self.current_token.clone();
        self.next_token(); // start of the right-hand side

        let Some(right) = self.parse_expression() else {
            self.errors.push(ParseError::InvalidAfterPipe);
            return None;
        };

        Some(Expression::Pipeline(PipelineExpression {
            token,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// The current token names the command; every token up to `|` or the
    /// end of input is one argument.
    fn parse_command_expression(&mut self) -> CommandExpression {
        let token = self.current_token.clone();
        let name = Identifier::new(token.clone());
        let mut args = Vec::new();

        while !self.peek_is(TokenKind::Pipe) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            if let Some(arg) = self.parse_primary_expression() {
                args.push(arg);
            }
        }

        CommandExpression { token, name, args }
    }

    fn parse_primary_expression(&mut self) -> Option<Expression> {
        let kind = self.current_token.kind;
        match kind {
            TokenKind::String => Some(Expression::StringLiteral(StringLiteral {
                token: self.current_token.clone(),
                value: self.current_token.literal.clone(),
            })),
            TokenKind::Dot => Some(Expression::Identifier(self.parse_path_expression())),
            TokenKind::Ident | TokenKind::Int => Some(Expression::Identifier(Identifier::new(
                self.current_token.clone(),
            ))),
            _ if kind.is_keyword() || kind.is_comparison() => Some(Expression::Identifier(
                Identifier::new(self.current_token.clone()),
            )),
            _ => {
                self.errors.push(ParseError::NoExpression(
                    self.current_token.literal.clone(),
                ));
                None
            }
        }
    }

    /// Folds `. name` style sequences into one dotted identifier.
    fn parse_path_expression(&mut self) -> Identifier {
        let token = self.current_token.clone();
        let mut path = token.literal.clone();

        loop {
            let extends = (self.current_is(TokenKind::Dot) && self.peek_is(TokenKind::Ident))
                || (self.current_is(TokenKind::Ident) && self.peek_is(TokenKind::Dot));
            if !extends {
                break;
            }
            self.next_token();
            path.push_str(&self.current_token.literal);
        }

        Identifier { token, value: path }
    }
}

/// Parses one line of input, returning either the program or every error
/// found in it.
pub fn parse(input: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    if parser.errors.is_empty() {
        Ok(program)
    } else {
        Err(parser.errors)
    }
}
