use serde_json::Value;

use super::{json_input, string_arg};
use crate::{evaluator::EvalError, object::Object, path::FieldPath};

/// `get <.field.path>`
///
/// On an object: the value at the path, `Null` when missing. Scalars come
/// back as text, objects and arrays as JSON.
///
/// On an array: the path is looked up in every element and the found
/// values are collected. Elements without the path are skipped, not
/// null-filled, so the result can be shorter than the input.
pub fn builtin_get(input: Option<&Object>, args: &[Object]) -> Object {
    get(input, args).unwrap_or_else(Object::from)
}

fn get(input: Option<&Object>, args: &[Object]) -> Result<Object, EvalError> {
    let data = json_input("get", input)?;
    let [arg] = args else {
        return Err(EvalError::Usage("get <.field.path>"));
    };
    let path = FieldPath::parse(string_arg("get", arg)?);

    match data {
        Value::Object(_) => Ok(path
            .lookup(data)
            .cloned()
            .map(Object::from_json_value)
            .unwrap_or(Object::Null)),
        Value::Array(items) => {
            let found = items
                .iter()
                .filter_map(|item| path.lookup(item).cloned())
                .collect();
            Ok(Object::Json(Value::Array(found)))
        }
        _ => Err(EvalError::InputShape {
            builtin: "get",
            expected: "a JSON object or array",
        }),
    }
}
