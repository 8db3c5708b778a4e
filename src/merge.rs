//! Deep merge for layered configuration values.
//!
//! Implements field-by-field merging where overlay values override base
//! values. Maps merge recursively; scalars and sequences are replaced
//! entirely, never merged element-wise.

use serde_json::Value;

/// Deep merge two values, with `overlay` taking precedence over `base`.
///
/// - Maps are merged recursively: keys in the overlay override keys in the
///   base, new keys are added
/// - Sequences, strings, numbers, booleans and nulls replace the base value
///   entirely; an overlay that sets a key to `null` wins
///
/// # Example
/// ```
/// use serde_json::json;
/// use confstack::merge::deep_merge;
///
/// let base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "colors": ["red", "blue"]
/// });
/// let overlay = json!({
///     "server": { "port": 9000 },
///     "colors": ["green"]
/// });
/// let result = deep_merge(base, overlay);
/// // Result: { "server": { "port": 9000, "host": "localhost" }, "colors": ["green"] }
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both are maps: merge recursively
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        // Any other case: overlay replaces base entirely
        (_, overlay) => overlay,
    }
}

/// Merge multiple values in order, with later values taking precedence.
///
/// Equivalent to folding `deep_merge` over the list.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
