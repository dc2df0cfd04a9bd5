use std::cmp::Ordering;

use serde_json::Value;

/// Total order over entity names: case-folded first, then exact bytes.
///
/// Two names that differ only in case (`"Alpha"`, `"alpha"`) still compare
/// unequal, so sorting a key set is deterministic whatever order the keys
/// arrived in.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Sort `(name, value)` pairs in place by [`compare_names`].
pub fn sort_by_name<T>(entries: &mut [(String, T)]) {
    entries.sort_by(|(a, _), (b, _)| compare_names(a, b));
}

/// Short JSON type name used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
