use std::fmt;

/// Signature shared by every builtin command.
///
/// The first argument is the previous pipeline stage's result, `None` for
/// the first stage; the slice holds the evaluated arguments.
pub type BuiltinFn = fn(input: Option<&Object>, args: &[Object]) -> Object;

/// A command implemented inside the interpreter.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, input: Option<&Object>, args: &[Object]) -> Object {
        (self.func)(input, args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

// Builtins are identified by name; comparing fn pointers is unreliable.
impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Variant tag of an [`Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    String,
    Json,
    Null,
    Error,
    Builtin,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::String => "STRING",
            ObjectType::Json => "JSON",
            ObjectType::Null => "NULL",
            ObjectType::Error => "ERROR",
            ObjectType::Builtin => "BUILTIN",
        })
    }
}

/// A runtime value produced by evaluation.
///
/// Errors are ordinary values: they travel through the same channel as
/// results and every consumer checks for them explicitly.
///
/// # Examples
///
/// ```
/// use jsonsh::Object;
/// use serde_json::json;
///
/// let text = Object::String("hello\n".to_string());
/// assert_eq!(text.inspect(), "hello\n");
///
/// let data = Object::Json(json!({"name": "Ann"}));
/// assert_eq!(data.inspect(), "{\n  \"name\": \"Ann\"\n}");
///
/// assert_eq!(Object::Null.inspect(), "null");
/// assert_eq!(Object::error("boom").inspect(), "Error: boom");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Plain text, e.g. the output of a program that did not print JSON
    String(String),

    /// Parsed JSON of any shape
    Json(serde_json::Value),

    /// Absence of a value; bindings and `cd` produce it
    Null,

    /// A failure and its message
    Error(String),

    /// A native command
    Builtin(Builtin),
}

impl Object {
    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::String(_) => ObjectType::String,
            Object::Json(_) => ObjectType::Json,
            Object::Null => ObjectType::Null,
            Object::Error(_) => ObjectType::Error,
            Object::Builtin(_) => ObjectType::Builtin,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Textual rendering. JSON is indented with two spaces; strings are
    /// returned verbatim.
    pub fn inspect(&self) -> String {
        match self {
            Object::String(s) => s.clone(),
            Object::Json(value) => serde_json::to_string_pretty(value)
                .unwrap_or_else(|e| format!("Error marshaling JSON: {}", e)),
            Object::Null => "null".to_string(),
            Object::Error(message) => format!("Error: {}", message),
            Object::Builtin(_) => "builtin function".to_string(),
        }
    }

    /// Converts a value found inside a JSON document: containers stay JSON,
    /// scalars become their text, JSON null becomes [`Object::Null`].
    pub fn from_json_value(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Object::Null,
            Value::String(s) => Object::String(s),
            Value::Bool(b) => Object::String(b.to_string()),
            Value::Number(n) => Object::String(n.to_string()),
            container @ (Value::Array(_) | Value::Object(_)) => Object::Json(container),
        }
    }

    /// Interprets a program's captured standard output: JSON when it parses,
    /// otherwise the raw text, untrimmed.
    pub fn from_process_output(stdout: &[u8]) -> Self {
        match serde_json::from_slice(stdout) {
            Ok(value) => Object::Json(value),
            Err(_) => Object::String(String::from_utf8_lossy(stdout).into_owned()),
        }
    }

    /// JSON form of the object, as listed by `vars`.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Object::String(s) => serde_json::Value::String(s.clone()),
            Object::Json(value) => value.clone(),
            Object::Null => serde_json::Value::Null,
            Object::Error(_) | Object::Builtin(_) => serde_json::Value::String(self.inspect()),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_process_output_json() {
        let obj = Object::from_process_output(b"{\"a\": [1, 2]}\n");
        assert_eq!(obj, Object::Json(json!({"a": [1, 2]})));
    }

    #[test]
    fn test_process_output_text_keeps_newline() {
        let obj = Object::from_process_output(b"hello\n");
        assert_eq!(obj, Object::String("hello\n".to_string()));
    }

    #[test]
    fn test_process_output_empty_is_text() {
        assert_eq!(
            Object::from_process_output(b""),
            Object::String(String::new())
        );
    }

    #[test]
    fn test_json_inspect_round_trips() {
        let value = json!({"users": [{"name": "Ann", "tags": ["a", "b"]}, null, true, 1.5]});
        let rendered = Object::Json(value.clone()).inspect();
        let reparsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(reparsed, value);
    }

    #[test]
    fn test_from_json_value_scalars() {
        assert_eq!(Object::from_json_value(json!(5)), Object::String("5".into()));
        assert_eq!(Object::from_json_value(json!(true)), Object::String("true".into()));
        assert_eq!(Object::from_json_value(json!("x")), Object::String("x".into()));
        assert_eq!(Object::from_json_value(json!(null)), Object::Null);
        assert_eq!(Object::from_json_value(json!([1])), Object::Json(json!([1])));
    }

    #[test]
    fn test_object_types() {
        assert_eq!(Object::Null.object_type().to_string(), "NULL");
        assert_eq!(Object::error("x").object_type(), ObjectType::Error);
        assert!(Object::error("x").is_error());
        assert!(!Object::Null.is_error());
    }
}
