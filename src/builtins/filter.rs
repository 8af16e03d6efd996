use std::slice;

use serde_json::Value;

use super::{compare::evaluate_condition, json_input, string_arg, CompareOp};
use crate::{evaluator::EvalError, object::Object, path::FieldPath};

/// `where <.field> <operator> <value>`
///
/// Keeps the elements whose field compares true against the value. A
/// single object is treated as a one-element array; elements lacking the
/// field are dropped. The result is always a JSON array.
pub fn builtin_where(input: Option<&Object>, args: &[Object]) -> Object {
    filter(input, args).unwrap_or_else(Object::from)
}

fn filter(input: Option<&Object>, args: &[Object]) -> Result<Object, EvalError> {
    let data = json_input("where", input)?;
    let items = match data {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => slice::from_ref(data),
        _ => {
            return Err(EvalError::InputShape {
                builtin: "where",
                expected: "arrays of objects",
            });
        }
    };

    let [path, op, literal] = args else {
        return Err(EvalError::Usage("where <.field> <operator> <value>"));
    };
    let path = FieldPath::parse(string_arg("where", path)?);
    let op: CompareOp = string_arg("where", op)?
        .parse()
        .map_err(|e: EvalError| EvalError::Builtin {
            builtin: "where",
            message: e.to_string(),
        })?;
    let literal = string_arg("where", literal)?;

    let mut kept = Vec::new();
    for item in items {
        let Some(field) = path.lookup(item) else {
            continue;
        };
        if evaluate_condition(field, op, literal).map_err(|e| EvalError::Builtin {
            builtin: "where",
            message: e.to_string(),
        })? {
            kept.push(item.clone());
        }
    }

    Ok(Object::Json(Value::Array(kept)))
}
