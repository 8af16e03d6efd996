// tests/parser_tests.rs

use jsonsh::ast::{Expression, Node, Statement, TokenKind};
use jsonsh::lexer::Lexer;
use jsonsh::parser::{parse, ParseError, Parser};

fn parse_ok(input: &str) -> jsonsh::Program {
    match parse(input) {
        Ok(program) => program,
        Err(errors) => panic!("unexpected parse errors for {:?}: {:?}", input, errors),
    }
}

fn parse_err(input: &str) -> Vec<ParseError> {
    match parse(input) {
        Ok(program) => panic!("expected parse errors for {:?}, got {}", input, program),
        Err(errors) => errors,
    }
}

fn single_expression(input: &str) -> Expression {
    let program = parse_ok(input);
    assert_eq!(program.statements.len(), 1, "statements in {:?}", input);
    match &program.statements[0] {
        Statement::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn arg_values(expr: &Expression) -> Vec<String> {
    let Expression::Command(cmd) = expr else {
        panic!("expected a command, got {:?}", expr);
    };
    cmd.args
        .iter()
        .map(|arg| match arg {
            Expression::Identifier(ident) => ident.value.clone(),
            Expression::StringLiteral(lit) => lit.value.clone(),
            other => panic!("unexpected argument {:?}", other),
        })
        .collect()
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_command_with_arguments() {
    let expr = single_expression("ls -l /tmp");
    let Expression::Command(cmd) = &expr else {
        panic!("expected a command");
    };
    assert_eq!(cmd.name.value, "ls");
    assert_eq!(arg_values(&expr), vec!["-l", "/tmp"]);
    assert_eq!(expr.to_string(), "ls -l /tmp");
}

#[test]
fn test_builtin_commands() {
    let test_cases = vec![
        ("cd /tmp", TokenKind::Cd),
        ("get .name", TokenKind::Get),
        ("where .age > 30", TokenKind::Where),
        ("select .a .b", TokenKind::Select),
        ("vars", TokenKind::Vars),
        ("exit", TokenKind::Exit),
    ];

    for (input, kind) in test_cases {
        let expr = single_expression(input);
        let Expression::Command(cmd) = &expr else {
            panic!("expected a command for {}", input);
        };
        assert_eq!(cmd.token.kind, kind, "Failed for input: {}", input);
        assert_eq!(expr.to_string(), input);
    }
}

#[test]
fn test_operators_and_numbers_as_arguments() {
    let expr = single_expression("where .age >= 30");
    assert_eq!(arg_values(&expr), vec![".age", ">=", "30"]);

    let expr = single_expression("where .name != \"Bob\"");
    assert_eq!(arg_values(&expr), vec![".name", "!=", "Bob"]);
}

#[test]
fn test_keywords_as_arguments() {
    let expr = single_expression("echo if cd true let");
    assert_eq!(arg_values(&expr), vec!["if", "cd", "true", "let"]);
}

#[test]
fn test_split_path_is_folded() {
    let expr = single_expression("get . a . b");
    assert_eq!(arg_values(&expr), vec![".a.b"]);
}

#[test]
fn test_bare_string_statement() {
    let expr = single_expression("\"hello\"");
    let Expression::StringLiteral(lit) = &expr else {
        panic!("expected a string literal");
    };
    assert_eq!(lit.value, "hello");
    assert_eq!(expr.to_string(), "\"hello\"");
}

// ============================================================================
// Pipelines
// ============================================================================

#[test]
fn test_simple_pipeline() {
    let expr = single_expression("cat data.json | get .items");
    let Expression::Pipeline(pipe) = &expr else {
        panic!("expected a pipeline");
    };
    assert_eq!(pipe.left.to_string(), "cat data.json");
    assert_eq!(pipe.right.to_string(), "get .items");
    assert_eq!(pipe.token.literal, "|");
}

#[test]
fn test_pipelines_nest_to_the_right() {
    let expr = single_expression("cat f | where .a == 1 | select .b");
    assert_eq!(expr.to_string(), "(cat f | (where .a == 1 | select .b))");

    let Expression::Pipeline(outer) = &expr else {
        panic!("expected a pipeline");
    };
    assert!(matches!(*outer.left, Expression::Command(_)));
    assert!(matches!(*outer.right, Expression::Pipeline(_)));
}

#[test]
fn test_string_into_pipeline() {
    let expr = single_expression("\"hello\" | cat");
    assert_eq!(expr.to_string(), "(\"hello\" | cat)");
}

// ============================================================================
// Let Statements
// ============================================================================

#[test]
fn test_let_statement() {
    let program = parse_ok("let greeting = \"hi\"");
    assert_eq!(program.statements.len(), 1);
    let Statement::Let(stmt) = &program.statements[0] else {
        panic!("expected a let statement");
    };
    assert_eq!(stmt.name.value, "greeting");
    assert!(matches!(stmt.value, Expression::StringLiteral(_)));
    assert_eq!(program.to_string(), "let greeting = \"hi\"");
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_let_with_pipeline() {
    let program = parse_ok("let names = cat users.json | select .name");
    assert_eq!(
        program.to_string(),
        "let names = (cat users.json | select .name)"
    );
}

#[test]
fn test_statements_after_primary() {
    let program = parse_ok("let a = \"x\" \"y\"");
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.to_string(), "let a = \"x\"; \"y\"");
}

#[test]
fn test_empty_input() {
    let program = parse_ok("");
    assert!(program.is_empty());
    assert_eq!(program.token_literal(), "");
    assert!(parse_ok("   ").is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_let_missing_name() {
    let errors = parse_err("let = 5");
    assert_eq!(
        errors[0],
        ParseError::UnexpectedToken {
            expected: TokenKind::Ident,
            found: TokenKind::Assign,
        }
    );
    assert_eq!(
        errors[0].to_string(),
        "expected next token to be IDENT, got = instead"
    );
}

#[test]
fn test_let_missing_assign() {
    let errors = parse_err("let x \"v\"");
    assert_eq!(
        errors[0],
        ParseError::UnexpectedToken {
            expected: TokenKind::Assign,
            found: TokenKind::String,
        }
    );
}

#[test]
fn test_let_missing_value() {
    let errors = parse_err("let x =");
    assert!(errors.contains(&ParseError::MissingLetValue("x".to_string())));
}

#[test]
fn test_pipe_without_right_side() {
    let errors = parse_err("ls |");
    assert!(errors.contains(&ParseError::InvalidAfterPipe));
}

#[test]
fn test_pipe_without_valid_left_side() {
    let errors = parse_err(") | ls");
    assert_eq!(errors[0], ParseError::NoExpression(")".to_string()));
    assert!(errors.contains(&ParseError::InvalidBeforePipe));
}

#[test]
fn test_illegal_token() {
    let errors = parse_err("echo !");
    assert_eq!(errors, vec![ParseError::NoExpression("!".to_string())]);
    assert_eq!(
        errors[0].to_string(),
        "could not parse an expression starting with '!'"
    );
}

#[test]
fn test_control_flow_is_rejected() {
    for keyword in ["if", "else", "for", "def"] {
        let input = format!("{} x | y", keyword);
        let errors = parse_err(&input);
        assert_eq!(
            errors,
            vec![ParseError::UnsupportedConstruct(keyword.to_string())],
            "Failed for input: {}",
            input
        );
    }
    assert_eq!(
        ParseError::UnsupportedConstruct("for".into()).to_string(),
        "'for' is not supported"
    );
}

#[test]
fn test_errors_are_collected_not_fatal() {
    let mut parser = Parser::new(Lexer::new("let = x"));
    let program = parser.parse_program();
    assert!(!parser.errors().is_empty());
    // Parsing resumed after the failed let
    assert_eq!(program.to_string(), "x");
}
