//! Nested value access by key sequence.
//!
//! Walks a structured value down the keys of a logical path. Map steps look
//! keys up directly; sequence steps treat the key as a numeric index
//! (`"numbers:1"` reads the second element). Failures always name the full
//! original path, not the step that failed.

use crate::error::{ConfigError, Result};
use serde_json::{Map, Value};

/// Walk `value` down `keys` and return the terminal value.
///
/// The terminal value may itself be nested when the key sequence is a
/// prefix of a deeper structure.
pub fn resolve<'a>(value: &'a Value, keys: &[String], full_path: &str) -> Result<&'a Value> {
    let mut current = value;
    for key in keys {
        current = step(current, key).ok_or_else(|| invalid_path(full_path))?;
    }
    Ok(current)
}

fn step<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

/// Assign `new_value` at the position named by `keys`, mutating `root`.
///
/// Non-final keys must already exist unless `force` is set, in which case
/// missing steps are created as empty maps down to the final key. The final
/// key itself also requires presence without `force`. An empty key sequence
/// replaces the root wholesale.
pub fn assign(
    root: &mut Value,
    keys: &[String],
    new_value: Value,
    force: bool,
    full_path: &str,
) -> Result<()> {
    let Some((last, parents)) = keys.split_last() else {
        *root = new_value;
        return Ok(());
    };

    let mut current = root;
    for key in parents {
        current = step_mut(current, key, force).ok_or_else(|| invalid_path(full_path))?;
    }

    match current {
        Value::Object(map) => {
            if force || map.contains_key(last) {
                map.insert(last.clone(), new_value);
                Ok(())
            } else {
                Err(invalid_path(full_path))
            }
        }
        Value::Array(items) => {
            let slot = last
                .parse::<usize>()
                .ok()
                .and_then(|idx| items.get_mut(idx))
                .ok_or_else(|| invalid_path(full_path))?;
            *slot = new_value;
            Ok(())
        }
        _ => Err(invalid_path(full_path)),
    }
}

fn step_mut<'a>(value: &'a mut Value, key: &str, force: bool) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => {
            if force && !map.contains_key(key) {
                map.insert(key.to_string(), Value::Object(Map::new()));
            }
            map.get_mut(key)
        }
        Value::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get_mut(idx)),
        _ => None,
    }
}

fn invalid_path(path: &str) -> ConfigError {
    ConfigError::InvalidPath {
        path: path.to_string(),
    }
}
