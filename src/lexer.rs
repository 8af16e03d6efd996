use crate::ast::{Token, TokenKind};

/// Pull-based tokenizer over one line of input.
///
/// Lexing never fails: characters that fit no category come out as
/// [`TokenKind::Illegal`] and the parser reports them.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

/// Characters that may appear inside a word.
///
/// This is a deny-list: everything except whitespace, the structural
/// characters `|=(){}[]` and quotes is allowed, so `-l`, `/etc/passwd`,
/// `a,b` and `.data.items` each lex as one word.
pub fn is_identifier_char(ch: Option<char>) -> bool {
    !matches!(
        ch,
        None | Some(
            ' ' | '\t' | '\n' | '\r' | '|' | '=' | '(' | ')' | '{' | '}' | '[' | ']' | '"' | '\''
        )
    )
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.current_char() {
            self.advance();
        }
    }

    /// Consumes one character and produces a token for it.
    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        self.advance();
        Token::new(kind, ch)
    }

    /// Consumes `ch`, plus a following `=` when present.
    fn with_optional_eq(&mut self, ch: char, alone: TokenKind, with_eq: TokenKind) -> Token {
        if self.peek_char() == Some('=') {
            self.advance();
            self.advance();
            Token::new(with_eq, format!("{}=", ch))
        } else {
            self.single(alone, ch)
        }
    }

    /// Reads a whole word. All-digit words are INT, keywords map to their
    /// own kind, anything else is IDENT.
    fn read_word(&mut self) -> Token {
        let start = self.position;
        while is_identifier_char(self.current_char()) {
            self.advance();
        }
        let word: String = self.input[start..self.position].iter().collect();

        let kind = if word.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Int
        } else {
            TokenKind::lookup_ident(&word)
        };
        Token::new(kind, word)
    }

    /// Reads up to the matching quote. An unterminated string runs to the
    /// end of input.
    fn read_string(&mut self, quote: char) -> String {
        self.advance(); // opening quote
        let start = self.position;

        while let Some(ch) = self.current_char() {
            if ch == quote {
                break;
            }
            self.advance();
        }
        let value = self.input[start..self.position].iter().collect();

        if self.current_char().is_some() {
            self.advance(); // closing quote
        }
        value
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Token::eof();
        };

        match ch {
            '=' => self.with_optional_eq(ch, TokenKind::Assign, TokenKind::Eq),
            '>' => self.with_optional_eq(ch, TokenKind::Gt, TokenKind::GtEq),
            '<' => self.with_optional_eq(ch, TokenKind::Lt, TokenKind::LtEq),
            // A lone '!' has no meaning yet
            '!' => self.with_optional_eq(ch, TokenKind::Illegal, TokenKind::NotEq),
            '|' => self.single(TokenKind::Pipe, ch),
            ';' => self.single(TokenKind::Semicolon, ch),
            ',' => self.single(TokenKind::Comma, ch),
            '(' => self.single(TokenKind::LParen, ch),
            ')' => self.single(TokenKind::RParen, ch),
            '{' => self.single(TokenKind::LBrace, ch),
            '}' => self.single(TokenKind::RBrace, ch),
            '[' => self.single(TokenKind::LBracket, ch),
            ']' => self.single(TokenKind::RBracket, ch),
            '.' => {
                if is_identifier_char(self.peek_char()) {
                    self.read_word()
                } else {
                    self.single(TokenKind::Dot, ch)
                }
            }
            '"' | '\'' => {
                let value = self.read_string(ch);
                Token::new(TokenKind::String, value)
            }
            _ if is_identifier_char(Some(ch)) => self.read_word(),
            _ => self.single(TokenKind::Illegal, ch),
        }
    }
}

/// Yields every token up to, but not including, EOF.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("let cd vars exit get where select if else for def true false");
    for kind in [
        TokenKind::Let,
        TokenKind::Cd,
        TokenKind::Vars,
        TokenKind::Exit,
        TokenKind::Get,
        TokenKind::Where,
        TokenKind::Select,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::Def,
        TokenKind::True,
        TokenKind::False,
    ] {
        assert_eq!(lexer.next_token().kind, kind);
    }
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_pipe() {
    let mut lexer = Lexer::new("ls -l | get .name");
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Ident, "ls"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Ident, "-l"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Pipe, "|"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Get, "get"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Ident, ".name"));
    assert_eq!(lexer.next_token(), Token::eof());
}
