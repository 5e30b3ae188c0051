//! Path resolution and contextual completion for query input

use super::schema::suggestion_candidates;
use serde_json::Value;

/// Field names reachable at the end of a dotted path
///
/// Segments are split on `.` (empty segments ignored). `key[]` steps into the
/// first element of the array under `key`, `key[N]` into element `N`, and a
/// bare `[]` into the first element of the current array. Any step that
/// cannot be taken yields an empty list.
///
/// Arrays found among the resulting fields also produce `key[]` and `key[0]`.
///
/// # Examples
///
/// ```
/// use reqtui::query::resolve_path;
/// use serde_json::json;
///
/// let body = json!({ "users": [{ "id": 1, "tags": ["a"] }] });
/// assert_eq!(resolve_path(".users[]", &body), ["id", "tags", "tags[]", "tags[0]"]);
/// assert!(resolve_path(".missing", &body).is_empty());
/// ```
#[must_use]
pub fn resolve_path(path: &str, root: &Value) -> Vec<String> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, step)
        .map(field_names)
        .unwrap_or_default()
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    let Some((key, rest)) = segment.split_once('[') else {
        return current.as_object()?.get(segment);
    };

    let base = if key.is_empty() {
        current
    } else {
        current.as_object()?.get(key)?
    };
    let items = base.as_array()?;

    match rest.strip_suffix(']')? {
        "" => items.first(),
        index => items.get(index.parse::<usize>().ok()?),
    }
}

fn field_names(value: &Value) -> Vec<String> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    let mut fields = Vec::with_capacity(map.len());
    for (key, child) in map {
        fields.push(key.clone());
        if child.is_array() {
            fields.push(format!("{key}[]"));
            fields.push(format!("{key}[0]"));
        }
    }
    fields
}

/// Contextual completions for a partially typed path
///
/// - `".users."` lists the fields under `.users`, appended to the input.
/// - `".users[0].na"` lists fields of `.users[0]` starting with `na`
///   (ignoring case).
/// - Input without a `.` yields nothing.
#[must_use]
pub fn complete(input: &str, root: &Value) -> Vec<String> {
    if let Some(base) = input.strip_suffix('.') {
        return resolve_path(base, root)
            .into_iter()
            .map(|field| format!("{input}{field}"))
            .collect();
    }

    let Some((base, partial)) = input.rsplit_once('.') else {
        return Vec::new();
    };
    let partial = partial.to_lowercase();

    resolve_path(base, root)
        .into_iter()
        .filter(|field| field.to_lowercase().starts_with(&partial))
        .map(|field| format!("{base}.{field}"))
        .collect()
}

/// Keep candidates containing `input`; everything when `input` is empty
#[must_use]
pub fn filter_candidates(candidates: &[String], input: &str) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| input.is_empty() || candidate.contains(input))
        .cloned()
        .collect()
}

/// Suggestion list shown for `input`
///
/// Contextual completions win when there are any; otherwise the static and
/// schema candidates are narrowed by substring.
#[must_use]
pub fn suggest(input: &str, body: Option<&Value>) -> Vec<String> {
    if let Some(body) = body {
        let contextual = complete(input, body);
        if !contextual.is_empty() {
            return contextual;
        }
    }
    filter_candidates(&suggestion_candidates(body), input)
}
