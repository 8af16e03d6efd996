use std::fmt;

/// Lexical category of a [`Token`].
///
/// The set is closed: anything the lexer cannot classify becomes
/// [`TokenKind::Illegal`] and is rejected later by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A character the lexer does not recognise (currently a lone `!`)
    Illegal,
    /// End of input
    Eof,

    // Identifiers and literals
    /// Command names, variable names, flags, paths, dotted field paths
    ///
    /// # Examples
    /// ```text
    /// ls
    /// -l
    /// /etc/passwd
    /// .data.items
    /// ```
    Ident,

    /// A run of decimal digits, kept as text
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 007
    /// ```
    Int,

    /// Contents of a single- or double-quoted string, quotes removed
    ///
    /// # Examples
    /// ```text
    /// "hello world"
    /// 'it works'
    /// ```
    String,

    // Operators
    /// `=`
    Assign,
    /// `|`
    Pipe,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// A standalone `.` not followed by an identifier character
    Dot,

    // Delimiters
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Let,
    Cd,
    Vars,
    Exit,
    Get,
    Where,
    Select,
    If,
    Else,
    For,
    Def,
    True,
    False,
}

impl TokenKind {
    /// Maps a scanned identifier to its keyword category, or [`TokenKind::Ident`].
    pub fn lookup_ident(ident: &str) -> TokenKind {
        match ident {
            "let" => TokenKind::Let,
            "cd" => TokenKind::Cd,
            "vars" => TokenKind::Vars,
            "exit" => TokenKind::Exit,
            "get" => TokenKind::Get,
            "where" => TokenKind::Where,
            "select" => TokenKind::Select,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "def" => TokenKind::Def,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Ident,
        }
    }

    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Let | Cd | Vars | Exit | Get | Where | Select | If | Else | For | Def | True | False
        )
    }

    /// Keywords that are lexed but have no grammar behind them.
    pub fn is_control_flow(self) -> bool {
        matches!(
            self,
            TokenKind::If | TokenKind::Else | TokenKind::For | TokenKind::Def
        )
    }

    /// Tokens that may begin a command invocation.
    pub fn starts_command(self) -> bool {
        use TokenKind::*;
        matches!(self, Ident | Cd | Vars | Exit | Get | Where | Select)
    }

    /// Comparison operators, which double as plain words in argument position
    /// (`where .age >= 30`).
    pub fn is_comparison(self) -> bool {
        use TokenKind::*;
        matches!(self, Eq | NotEq | Gt | Lt | GtEq | LtEq)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let name = match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Ident => "IDENT",
            Int => "INT",
            String => "STRING",
            Assign => "=",
            Pipe => "|",
            Eq => "==",
            NotEq => "!=",
            Gt => ">",
            Lt => "<",
            GtEq => ">=",
            LtEq => "<=",
            Dot => ".",
            Comma => ",",
            Semicolon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Let => "LET",
            Cd => "CD",
            Vars => "VARS",
            Exit => "EXIT",
            Get => "GET",
            Where => "WHERE",
            Select => "SELECT",
            If => "IF",
            Else => "ELSE",
            For => "FOR",
            Def => "DEF",
            True => "TRUE",
            False => "FALSE",
        };
        f.write_str(name)
    }
}

/// A lexical token: its category plus the exact source text it covers.
///
/// For strings the literal is the text between the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
