use serde_json::{Map, Value};

use super::{json_input, string_arg};
use crate::{evaluator::EvalError, object::Object, path::FieldPath};

/// `select <.path> [<.path> ...]`
///
/// Projects each object onto the requested paths. Every resolved path
/// contributes one key, the path's last segment; unresolved paths are left
/// out silently. Over an array, non-objects and objects that end up empty
/// are dropped.
pub fn builtin_select(input: Option<&Object>, args: &[Object]) -> Object {
    select(input, args).unwrap_or_else(Object::from)
}

fn select(input: Option<&Object>, args: &[Object]) -> Result<Object, EvalError> {
    let data = json_input("select", input)?;
    if args.is_empty() {
        return Err(EvalError::Usage("select <.field1> <.field2> ..."));
    }
    let paths = args
        .iter()
        .map(|arg| string_arg("select", arg).map(FieldPath::parse))
        .collect::<Result<Vec<_>, _>>()?;

    match data {
        Value::Object(_) => Ok(Object::Json(Value::Object(project(data, &paths)))),
        Value::Array(items) => {
            let projected = items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| project(item, &paths))
                .filter(|obj| !obj.is_empty())
                .map(Value::Object)
                .collect();
            Ok(Object::Json(Value::Array(projected)))
        }
        _ => Err(EvalError::InputShape {
            builtin: "select",
            expected: "JSON objects or arrays of objects",
        }),
    }
}

fn project(item: &Value, paths: &[FieldPath]) -> Map<String, Value> {
    let mut out = Map::new();
    for path in paths {
        if let Some(key) = path.last()
            && let Some(value) = path.lookup(item)
        {
            out.insert(key.to_string(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(words: &[&str]) -> Vec<Object> {
        words.iter().map(|w| Object::String(w.to_string())).collect()
    }

    #[test]
    fn test_select_object() {
        let input = Object::Json(json!({"name": "Ann", "age": 30, "extra": "x"}));
        assert_eq!(
            builtin_select(Some(&input), &args(&[".name", ".age"])),
            Object::Json(json!({"name": "Ann", "age": 30}))
        );
    }

    #[test]
    fn test_select_nested_key_is_last_segment() {
        let input = Object::Json(json!({"user": {"email": "a@b.c"}}));
        assert_eq!(
            builtin_select(Some(&input), &args(&[".user.email"])),
            Object::Json(json!({"email": "a@b.c"}))
        );
    }

    #[test]
    fn test_select_missing_paths_omitted() {
        let input = Object::Json(json!({"name": "Ann"}));
        assert_eq!(
            builtin_select(Some(&input), &args(&[".name", ".nope"])),
            Object::Json(json!({"name": "Ann"}))
        );
        assert_eq!(
            builtin_select(Some(&input), &args(&[".nope"])),
            Object::Json(json!({}))
        );
    }

    #[test]
    fn test_select_array_drops_empty() {
        let input = Object::Json(json!([{"name": "Ann", "age": 1}, {"age": 2}, "text"]));
        assert_eq!(
            builtin_select(Some(&input), &args(&[".name"])),
            Object::Json(json!([{"name": "Ann"}]))
        );
    }

    #[test]
    fn test_select_contract() {
        assert!(builtin_select(None, &args(&[".a"])).is_error());
        let input = Object::Json(json!({}));
        assert!(builtin_select(Some(&input), &[]).is_error());
        assert!(builtin_select(Some(&input), &[Object::Null]).is_error());
        let scalar = Object::Json(json!(1));
        assert!(builtin_select(Some(&scalar), &args(&[".a"])).is_error());
    }
}
