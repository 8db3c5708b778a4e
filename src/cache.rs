//! Keyed memo cache for fully merged configuration values.
//!
//! A cache is shared between `Configuration` instances through an
//! `Arc<dyn Cache>`, so implementations take `&self` and use interior
//! mutability. Without a cache every load re-reads from disk.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Keyed get/has/set store, one entry per file stem.
pub trait Cache: Send + Sync {
    /// Whether a value is stored under `key`.
    fn has(&self, key: &str) -> bool;

    /// The value stored under `key`, cloned out of the store.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: Value);
}

/// In-memory cache. Entries live as long as the process.
#[derive(Debug, Default)]
pub struct RuntimeCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl RuntimeCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for RuntimeCache {
    fn has(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}
