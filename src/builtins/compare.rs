use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::evaluator::EvalError;

/// Operators accepted by `where`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::GreaterThan => ">",
            CompareOp::LessThan => "<",
            CompareOp::GreaterEqual => ">=",
            CompareOp::LessEqual => "<=",
        }
    }

    fn apply<T: PartialOrd>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            CompareOp::Equal => lhs == rhs,
            CompareOp::NotEqual => lhs != rhs,
            CompareOp::GreaterThan => lhs > rhs,
            CompareOp::LessThan => lhs < rhs,
            CompareOp::GreaterEqual => lhs >= rhs,
            CompareOp::LessEqual => lhs <= rhs,
        }
    }

    /// Equality operators only; ordering is rejected.
    fn apply_eq<T: PartialEq>(self, lhs: &T, rhs: &T, kind: &'static str) -> Result<bool, EvalError> {
        match self {
            CompareOp::Equal => Ok(lhs == rhs),
            CompareOp::NotEqual => Ok(lhs != rhs),
            op => Err(EvalError::UnsupportedOperator {
                op: op.symbol().to_string(),
                kind,
            }),
        }
    }
}

impl FromStr for CompareOp {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Equal),
            "!=" => Ok(CompareOp::NotEqual),
            ">" => Ok(CompareOp::GreaterThan),
            "<" => Ok(CompareOp::LessThan),
            ">=" => Ok(CompareOp::GreaterEqual),
            "<=" => Ok(CompareOp::LessEqual),
            other => Err(EvalError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Compares a JSON field against a literal typed on the command line.
///
/// Tried in order:
/// 1. numeric field and numeric literal: numeric comparison, all operators
/// 2. boolean field and boolean literal: `==`/`!=` only
/// 3. otherwise both sides as text, `==`/`!=` only; the literal has
///    escape sequences such as `\t` decoded when they are valid
pub fn evaluate_condition(field: &Value, op: CompareOp, literal: &str) -> Result<bool, EvalError> {
    if let Value::Number(lhs) = field
        && let Some(matched) = compare_numbers(lhs, op, literal)
    {
        return Ok(matched);
    }

    if let Value::Bool(lhs) = field
        && let Some(rhs) = parse_bool(literal)
    {
        return op.apply_eq(lhs, &rhs, "boolean");
    }

    let lhs = match field {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    op.apply_eq(&lhs, &unquote(literal), "string")
}

/// `None` when the literal is not a number.
///
/// Exact decimal comparison when both sides fit a [`Decimal`]; `f64`
/// otherwise (huge exponents, `inf`, `NaN`).
fn compare_numbers(lhs: &Number, op: CompareOp, literal: &str) -> Option<bool> {
    let rhs_float = literal.parse::<f64>().ok()?;

    if let Some(lhs_dec) = parse_decimal(&lhs.to_string())
        && let Some(rhs_dec) = parse_decimal(literal)
    {
        return Some(op.apply(&lhs_dec, &rhs_dec));
    }

    let lhs_float = lhs.as_f64()?;
    Some(op.apply(&lhs_float, &rhs_float))
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Accepts the usual spellings: `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Decodes escape sequences (`\n`, `\"`, `\u00e9`, ...) in a literal, or
/// returns it untouched when it is not a valid escaped string.
fn unquote(literal: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", literal)).unwrap_or_else(|_| literal.to_string())
}
