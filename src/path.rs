use std::fmt;

use serde_json::Value;

/// A dotted path through nested JSON objects.
///
/// Paths are written as builtin arguments and name object keys only; there
/// is no array indexing.
///
/// # Examples
///
/// - `.name` → `["name"]`
/// - `.data.items` → `["data", "items"]`
/// - `user.email` → `["user", "email"]` (the leading dot is optional)
/// - `.` → `[""]`, a lookup of the empty key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a path argument. One leading `.` is dropped and the rest is
    /// split on `.`; empty segments are kept as empty keys, so a path always
    /// has at least one segment.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.strip_prefix('.').unwrap_or(raw);
        FieldPath {
            segments: trimmed.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final key, used as the output key by `select`.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Looks the path up in `data`. See [`access_field`].
    pub fn lookup<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        access_field(data, &self.segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.segments.join("."))
    }
}

/// Walks `path` through nested objects.
///
/// An empty path yields `data` itself. Each step requires the current value
/// to be an object containing the key; anything else is "not found".
/// Iterative, so document depth does not grow the stack.
pub fn access_field<'a, S: AsRef<str>>(data: &'a Value, path: &[S]) -> Option<&'a Value> {
    let mut current = data;
    for segment in path {
        current = current.as_object()?.get(segment.as_ref())?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_strips_one_leading_dot() {
        assert_eq!(FieldPath::parse(".x.y").segments(), ["x", "y"]);
        assert_eq!(FieldPath::parse("x.y").segments(), ["x", "y"]);
        assert_eq!(FieldPath::parse("..x").segments(), ["", "x"]);
    }

    #[test]
    fn test_parse_bare_dot_is_empty_key() {
        assert_eq!(FieldPath::parse(".").segments(), [""]);
        assert_eq!(FieldPath::parse("").segments(), [""]);
        assert_eq!(FieldPath::parse(".").last(), Some(""));
        assert_eq!(FieldPath::parse(".").to_string(), ".");
    }

    #[test]
    fn test_bare_dot_does_not_name_the_root() {
        let path = FieldPath::parse(".");
        assert_eq!(path.lookup(&json!({"a": 1})), None);
        assert_eq!(path.lookup(&json!(5)), None);
        assert_eq!(path.lookup(&json!({"": 2})), Some(&json!(2)));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldPath::parse("a.b").to_string(), ".a.b");
    }

    #[test]
    fn test_access_nested() {
        let doc = json!({"x": {"y": 5}});
        assert_eq!(access_field(&doc, &["x", "y"]), Some(&json!(5)));
        assert_eq!(access_field(&doc, &["x"]), Some(&json!({"y": 5})));
    }

    #[test]
    fn test_access_empty_path_is_identity() {
        let doc = json!([1, 2]);
        let empty: [&str; 0] = [];
        assert_eq!(access_field(&doc, &empty), Some(&doc));
    }

    #[test]
    fn test_access_missing() {
        let doc = json!({"x": 1});
        assert_eq!(access_field(&doc, &["y"]), None);
        // Cannot descend into a scalar
        assert_eq!(access_field(&doc, &["x", "y"]), None);
        // Arrays are not indexed
        assert_eq!(access_field(&json!([{"x": 1}]), &["x"]), None);
    }

    #[test]
    fn test_access_null_value_is_found() {
        let doc = json!({"x": null});
        assert_eq!(access_field(&doc, &["x"]), Some(&Value::Null));
    }

    #[test]
    fn test_access_deep_document() {
        let mut doc = json!(1);
        let mut path = Vec::new();
        for _ in 0..500 {
            doc = json!({ "k": doc });
            path.push("k");
        }
        assert_eq!(access_field(&doc, path.as_slice()), Some(&json!(1)));
    }
}
