//! Merge-field substitution over raw configuration text.
//!
//! Runs before structural decoding, so substituted values land in the file
//! text itself. Only placeholders for explicitly supplied keys are touched;
//! anything else, including unknown `{placeholder}` text, stays literal.
//! This is not a template engine.

use std::collections::HashMap;

/// Replace `{name}` with the mapped value for every supplied key.
pub fn merge_fields(text: &str, substitutions: &HashMap<String, String>) -> String {
    let mut merged = text.to_string();
    for (name, value) in substitutions {
        let field = format!("{{{}}}", name);
        merged = merged.replace(&field, value);
    }
    merged
}
