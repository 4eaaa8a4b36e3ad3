//! Small helpers shared by the localization bundle and the props merge.

use serde_json::Value;

/// Deep-merge `overlay` into `base`.
///
/// Objects merge key by key, recursively. Any other overlay value replaces the
/// base value outright, arrays included.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Join the non-empty class names with single spaces.
pub fn class_names<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> String {
    names
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
