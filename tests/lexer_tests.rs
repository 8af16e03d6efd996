// tests/lexer_tests.rs

use jsonsh::ast::{Token, TokenKind};
use jsonsh::lexer::Lexer;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input).map(|t| t.kind).collect()
}

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

// ============================================================================
// Operators and Delimiters
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("=", TokenKind::Assign),
        ("|", TokenKind::Pipe),
        (">", TokenKind::Gt),
        ("<", TokenKind::Lt),
        (".", TokenKind::Dot),
        (",", TokenKind::Comma),
        (";", TokenKind::Semicolon),
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("{", TokenKind::LBrace),
        ("}", TokenKind::RBrace),
        ("[", TokenKind::LBracket),
        ("]", TokenKind::RBracket),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token();
        assert_eq!(token, Token::new(expected, input), "Failed for input: {}", input);
        assert_eq!(lexer.next_token(), Token::eof());
    }
}

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", TokenKind::Eq),
        ("!=", TokenKind::NotEq),
        (">=", TokenKind::GtEq),
        ("<=", TokenKind::LtEq),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token(), Token::new(expected, input), "Failed for input: {}", input);
        assert_eq!(lexer.next_token(), Token::eof());
    }
}

#[test]
fn test_lone_bang_is_illegal() {
    assert_eq!(
        tokens("!x"),
        vec![
            Token::new(TokenKind::Illegal, "!"),
            Token::new(TokenKind::Ident, "x"),
        ]
    );
}

#[test]
fn test_operators_split_words() {
    assert_eq!(
        kinds("a==b"),
        vec![TokenKind::Ident, TokenKind::Eq, TokenKind::Ident]
    );
    assert_eq!(
        kinds("x=1"),
        vec![TokenKind::Ident, TokenKind::Assign, TokenKind::Int]
    );
    assert_eq!(
        kinds("ls|wc"),
        vec![TokenKind::Ident, TokenKind::Pipe, TokenKind::Ident]
    );
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("ls");
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Ident, "ls"));
    assert_eq!(lexer.next_token(), Token::eof());
    assert_eq!(lexer.next_token(), Token::eof());
}

// ============================================================================
// Words
// ============================================================================

#[test]
fn test_command_line_words() {
    let test_cases = vec!["ls", "-l", "--all", "/etc/passwd", "a,b", "~/notes.txt", "héllo", "a>b", "x;y"];

    for input in test_cases {
        assert_eq!(
            tokens(input),
            vec![Token::new(TokenKind::Ident, input)],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_dotted_paths() {
    assert_eq!(tokens(".name"), vec![Token::new(TokenKind::Ident, ".name")]);
    assert_eq!(
        tokens(".data.items"),
        vec![Token::new(TokenKind::Ident, ".data.items")]
    );
    assert_eq!(tokens("a.b"), vec![Token::new(TokenKind::Ident, "a.b")]);
    assert_eq!(tokens(".."), vec![Token::new(TokenKind::Ident, "..")]);
}

#[test]
fn test_standalone_dot() {
    assert_eq!(kinds(". | x"), vec![TokenKind::Dot, TokenKind::Pipe, TokenKind::Ident]);
    assert_eq!(kinds(".|x"), vec![TokenKind::Dot, TokenKind::Pipe, TokenKind::Ident]);
}

#[test]
fn test_digit_runs() {
    assert_eq!(tokens("42"), vec![Token::new(TokenKind::Int, "42")]);
    assert_eq!(tokens("007"), vec![Token::new(TokenKind::Int, "007")]);
    assert_eq!(tokens("10k"), vec![Token::new(TokenKind::Ident, "10k")]);
    assert_eq!(tokens("2>&1"), vec![Token::new(TokenKind::Ident, "2>&1")]);
    assert_eq!(tokens("1.5"), vec![Token::new(TokenKind::Ident, "1.5")]);
}

#[test]
fn test_keywords_and_lookalikes() {
    assert_eq!(
        kinds("let cd vars exit get where select"),
        vec![
            TokenKind::Let,
            TokenKind::Cd,
            TokenKind::Vars,
            TokenKind::Exit,
            TokenKind::Get,
            TokenKind::Where,
            TokenKind::Select,
        ]
    );
    assert_eq!(
        kinds("letter getter Let GET"),
        vec![TokenKind::Ident; 4]
    );
}

#[test]
fn test_lookup_ident() {
    assert_eq!(TokenKind::lookup_ident("where"), TokenKind::Where);
    assert_eq!(TokenKind::lookup_ident("true"), TokenKind::True);
    assert_eq!(TokenKind::lookup_ident("cat"), TokenKind::Ident);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_quoted_strings() {
    assert_eq!(
        tokens("\"hello world\""),
        vec![Token::new(TokenKind::String, "hello world")]
    );
    assert_eq!(
        tokens("'it works'"),
        vec![Token::new(TokenKind::String, "it works")]
    );
    assert_eq!(tokens("\"\""), vec![Token::new(TokenKind::String, "")]);
}

#[test]
fn test_other_quote_is_literal() {
    assert_eq!(tokens("\"a'b\""), vec![Token::new(TokenKind::String, "a'b")]);
    assert_eq!(tokens("'say \"hi\"'"), vec![Token::new(TokenKind::String, "say \"hi\"")]);
}

#[test]
fn test_structural_chars_inside_strings() {
    assert_eq!(
        tokens("\"a | b = c\""),
        vec![Token::new(TokenKind::String, "a | b = c")]
    );
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let mut lexer = Lexer::new("echo \"never closed");
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Ident, "echo"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::String, "never closed"));
    assert_eq!(lexer.next_token(), Token::eof());
}

// ============================================================================
// Whole Lines
// ============================================================================

#[test]
fn test_let_statement() {
    assert_eq!(
        tokens("let name = \"Ann\""),
        vec![
            Token::new(TokenKind::Let, "let"),
            Token::new(TokenKind::Ident, "name"),
            Token::new(TokenKind::Assign, "="),
            Token::new(TokenKind::String, "Ann"),
        ]
    );
}

#[test]
fn test_pipeline_with_builtins() {
    assert_eq!(
        tokens("cat users.json | where .age >= 30 | select .name"),
        vec![
            Token::new(TokenKind::Ident, "cat"),
            Token::new(TokenKind::Ident, "users.json"),
            Token::new(TokenKind::Pipe, "|"),
            Token::new(TokenKind::Where, "where"),
            Token::new(TokenKind::Ident, ".age"),
            Token::new(TokenKind::GtEq, ">="),
            Token::new(TokenKind::Int, "30"),
            Token::new(TokenKind::Pipe, "|"),
            Token::new(TokenKind::Select, "select"),
            Token::new(TokenKind::Ident, ".name"),
        ]
    );
}

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(
        kinds("  ls\t-l \r\n"),
        vec![TokenKind::Ident, TokenKind::Ident]
    );
    assert!(kinds("   ").is_empty());
    assert!(kinds("").is_empty());
}
