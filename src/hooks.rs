//! Registered transform hooks that run around format decoding.
//!
//! Three hook kinds exist:
//! - **Path parsers** rewrite a file stem before it is resolved to a file
//! - **Pre-parsers** rewrite raw text before it is decoded
//! - **Post-parsers** rewrite the decoded value
//!
//! Path parsers and pre-parsers are keyed by a regex pattern and only run
//! when the pattern matches; re-registering a pattern replaces the hook in
//! place. Post-parsers are an append-only ordered list and always run. The
//! two registration structures are intentionally different.

use crate::error::{ConfigError, Result};
use regex_lite::{Captures, Match, Regex};
use serde_json::Value;

/// Rewrites a file stem. Receives the capture groups and the current stem.
pub type PathParserFn = Box<dyn for<'t> Fn(&Captures<'t>, &str) -> String + Send + Sync>;

/// Rewrites raw text. Receives every match and the current text.
pub type PreParserFn = Box<dyn for<'t> Fn(&[Match<'t>], &str) -> String + Send + Sync>;

/// Rewrites the decoded value. Takes the value by move and returns the
/// replacement, so hooks never need access to loader internals.
pub type PostParserFn = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Ordered pattern-keyed hook table.
///
/// Registration order is preserved; registering a pattern that is already
/// present replaces its hook without moving it.
pub struct PatternHooks<F> {
    entries: Vec<(String, Regex, F)>,
}

impl<F> PatternHooks<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `hook` under `pattern`, compiling the pattern up front.
    pub fn register(&mut self, pattern: &str, hook: F) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if let Some(entry) = self.entries.iter_mut().find(|(key, _, _)| key == pattern) {
            entry.1 = regex;
            entry.2 = hook;
        } else {
            self.entries.push((pattern.to_string(), regex, hook));
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Regex, &F)> {
        self.entries.iter().map(|(_, regex, hook)| (regex, hook))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> Default for PatternHooks<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run every matching path parser over `stem`, in registration order.
///
/// Each hook sees the previous hook's output, so rewrites compose left to
/// right.
pub fn apply_path_parsers(hooks: &PatternHooks<PathParserFn>, stem: &str) -> String {
    let mut stem = stem.to_string();
    for (regex, hook) in hooks.iter() {
        let rewritten = regex.captures(&stem).map(|caps| hook(&caps, &stem));
        if let Some(rewritten) = rewritten {
            stem = rewritten;
        }
    }
    stem
}

/// Run every matching pre-parser over `raw`, in registration order.
///
/// A pre-parser only runs when its pattern matches the current text, and
/// receives the full match collection.
pub fn apply_pre_parsers(hooks: &PatternHooks<PreParserFn>, raw: &str) -> String {
    let mut text = raw.to_string();
    for (regex, hook) in hooks.iter() {
        if let Some(rewritten) = run_pre_parser(regex, hook, &text) {
            text = rewritten;
        }
    }
    text
}

fn run_pre_parser(regex: &Regex, hook: &PreParserFn, text: &str) -> Option<String> {
    let matches: Vec<Match<'_>> = regex.find_iter(text).collect();
    if matches.is_empty() {
        None
    } else {
        Some(hook(&matches, text))
    }
}

/// Run every post-parser over `value`, in registration order.
pub fn apply_post_parsers(hooks: &[PostParserFn], mut value: Value) -> Value {
    for hook in hooks {
        value = hook(value);
    }
    value
}
