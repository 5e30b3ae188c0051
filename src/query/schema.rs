//! Schema-derived suggestion candidates
//!
//! Field paths are sampled from an actual response body rather than a
//! declared schema. Arrays are sampled through their first element.

use serde_json::{Map, Value};

/// Expressions offered regardless of the body's shape
pub const STATIC_SUGGESTIONS: &[&str] = &[
    ".",
    ".[]",
    ".[0]",
    "length",
    "keys",
    "keys[]",
    "type",
    "empty",
    "map(.)",
    "select(.)",
    "sort",
    "reverse",
    "unique",
    "group_by(.)",
    "min",
    "max",
    "add",
];

/// Levels below the root's immediate children that are still descended into
const MAX_NESTING: usize = 2;

/// Extract candidate field paths from `value`
///
/// Emits `.key` for every object key, plus `.key[]` and `.key[0]` when the
/// value is an array, and descends into nested objects (or an array's first
/// element) for at most three levels of keys. Non-object roots yield nothing.
///
/// # Examples
///
/// ```
/// use reqtui::query::extract_paths;
/// use serde_json::json;
///
/// let paths = extract_paths(&json!({ "users": [{ "id": 1 }] }));
/// assert_eq!(paths, [".users", ".users[]", ".users[0]", ".users[0].id"]);
/// ```
#[must_use]
pub fn extract_paths(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    if let Value::Object(map) = value {
        collect(map, "", 0, &mut paths);
    }
    paths
}

fn collect(map: &Map<String, Value>, prefix: &str, depth: usize, out: &mut Vec<String>) {
    for (key, child) in map {
        let path = format!("{prefix}.{key}");
        out.push(path.clone());

        let nested = match child {
            Value::Array(items) => {
                out.push(format!("{path}[]"));
                let sampled = format!("{path}[0]");
                out.push(sampled.clone());
                match items.first() {
                    Some(Value::Object(inner)) => Some((inner, sampled)),
                    _ => None,
                }
            }
            Value::Object(inner) => Some((inner, path)),
            _ => None,
        };

        if depth < MAX_NESTING {
            if let Some((inner, path)) = nested {
                collect(inner, &path, depth + 1, out);
            }
        }
    }
}

/// Static vocabulary followed by the body's schema paths
#[must_use]
pub fn suggestion_candidates(body: Option<&Value>) -> Vec<String> {
    STATIC_SUGGESTIONS
        .iter()
        .map(|s| (*s).to_string())
        .chain(body.map(extract_paths).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_users_paths() {
        let paths = extract_paths(&json!({"users": [{"id": 1, "name": "a"}]}));
        for expected in [".users", ".users[]", ".users[0]", ".users[0].id", ".users[0].name"] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_depth_is_bounded() {
        let value = json!({"a": {"b": {"c": {"d": {"e": 1}}}}});
        let paths = extract_paths(&value);
        assert_eq!(paths, vec![".a", ".a.b", ".a.b.c"]);
    }

    #[test]
    fn test_depth_bound_through_arrays() {
        let value = json!({"a": [{"b": [{"c": [{"d": 1}]}]}]});
        let paths = extract_paths(&value);
        assert!(paths.contains(&".a[0].b[0].c[0]".to_string()));
        assert!(!paths.iter().any(|p| p.ends_with(".d")));
    }

    #[test]
    fn test_non_object_root_is_empty() {
        assert!(extract_paths(&json!([{"a": 1}])).is_empty());
        assert!(extract_paths(&json!("text")).is_empty());
        assert!(extract_paths(&json!(null)).is_empty());
    }

    #[test]
    fn test_scalars_and_empty_arrays_are_leaves() {
        let mut paths = extract_paths(&json!({"n": 1, "list": [], "nums": [1, 2]}));
        paths.sort();
        assert_eq!(
            paths,
            vec![".list", ".list[0]", ".list[]", ".n", ".nums", ".nums[0]", ".nums[]"]
        );
    }

    #[test]
    fn test_candidates_start_with_static_vocabulary() {
        let body = json!({"total": 2});
        let candidates = suggestion_candidates(Some(&body));
        assert_eq!(candidates.len(), STATIC_SUGGESTIONS.len() + 1);
        assert_eq!(candidates[0], ".");
        assert_eq!(candidates.last().map(String::as_str), Some(".total"));

        assert_eq!(suggestion_candidates(None).len(), STATIC_SUGGESTIONS.len());
    }
}
