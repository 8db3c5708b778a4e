//! Path-addressed configuration reader and writer.
//!
//! `Configuration` ties the pieces together: it resolves a logical path to
//! a file stem, loads and layers the base file with environment overlays,
//! runs the transform pipeline around decoding, and walks the remaining
//! keys to read or write a single value. An optional shared cache
//! short-circuits the whole load.

use crate::access;
use crate::cache::Cache;
use crate::codec::Format;
use crate::error::{ConfigError, Result};
use crate::hooks::{self, PathParserFn, PatternHooks, PostParserFn, PreParserFn};
use crate::merge::deep_merge;
use crate::path;
use crate::template;
use regex_lite::{Captures, Match};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration reader and writer over a directory of YAML or JSON files.
///
/// Logical paths like `"app:server:port"` resolve to the file
/// `<directory>/app<ext>` and the nested lookup `server.port` inside it.
/// Registered environments contribute overlay files
/// `<directory>/app.<env><ext>` that deep-merge over the base in
/// registration order.
pub struct Configuration {
    format: Format,
    directory: PathBuf,
    environments: Vec<String>,
    path_parsers: PatternHooks<PathParserFn>,
    pre_parsers: PatternHooks<PreParserFn>,
    post_parsers: Vec<PostParserFn>,
    cache: Option<Arc<dyn Cache>>,
}

impl Configuration {
    /// New configuration rooted at the current directory, in YAML format,
    /// with no environments, hooks, or cache.
    pub fn new() -> Self {
        Self {
            format: Format::default(),
            directory: PathBuf::from("."),
            environments: Vec::new(),
            path_parsers: PatternHooks::new(),
            pre_parsers: PatternHooks::new(),
            post_parsers: Vec::new(),
            cache: None,
        }
    }

    /// Active file format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Switch the file format for subsequent loads and writes.
    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// Directory that file stems resolve under.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    /// Registered environments, in precedence order.
    pub fn environments(&self) -> &[String] {
        &self.environments
    }

    /// Replace the environment list. Order is significant: later entries
    /// override earlier ones and the base file.
    pub fn set_environments<I, S>(&mut self, environments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
    }

    /// Attach a shared cache. Loads consult it by file stem and store the
    /// fully merged value after a successful load or set.
    pub fn set_cache(&mut self, cache: Arc<dyn Cache>) {
        self.cache = Some(cache);
    }

    /// Register a stem rewrite hook under `pattern`.
    ///
    /// Re-registering a pattern replaces the prior hook.
    pub fn register_path_parser<F>(&mut self, pattern: &str, hook: F) -> Result<()>
    where
        F: for<'t> Fn(&Captures<'t>, &str) -> String + Send + Sync + 'static,
    {
        self.path_parsers.register(pattern, Box::new(hook))
    }

    /// Register a raw-text rewrite hook under `pattern`.
    ///
    /// Re-registering a pattern replaces the prior hook.
    pub fn register_pre_parser<F>(&mut self, pattern: &str, hook: F) -> Result<()>
    where
        F: for<'t> Fn(&[Match<'t>], &str) -> String + Send + Sync + 'static,
    {
        self.pre_parsers.register(pattern, Box::new(hook))
    }

    /// Append a decoded-value rewrite hook. Post-parsers always run, in
    /// registration order.
    pub fn register_post_parser<F>(&mut self, hook: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.post_parsers.push(Box::new(hook));
    }

    /// File stem for a logical path, after any registered path parsers.
    pub fn file_stem(&self, logical_path: &str) -> String {
        let stem = path::raw_stem(logical_path);
        hooks::apply_path_parsers(&self.path_parsers, stem)
    }

    /// On-disk path of the base file for `stem`.
    pub fn file_path(&self, stem: &str) -> PathBuf {
        self.directory
            .join(format!("{}{}", stem, self.format.extension()))
    }

    /// On-disk path of the overlay file for `stem` in `environment`.
    pub fn environment_file_path(&self, stem: &str, environment: &str) -> PathBuf {
        self.directory.join(format!(
            "{}.{}{}",
            stem,
            environment,
            self.format.extension()
        ))
    }

    /// Load the full merged structure for a logical path's stem.
    pub fn load(&self, logical_path: &str) -> Result<Value> {
        self.load_with(logical_path, &HashMap::new())
    }

    /// Load with merge-field substitutions applied to the raw text of the
    /// base file and every overlay before decoding.
    ///
    /// A cache hit returns the stored value as-is: neither overlay files
    /// nor freshly supplied substitutions are consulted again.
    pub fn load_with(
        &self,
        logical_path: &str,
        substitutions: &HashMap<String, String>,
    ) -> Result<Value> {
        let stem = self.file_stem(logical_path);

        if let Some(cache) = &self.cache
            && let Some(value) = cache.get(&stem)
        {
            debug!(%stem, "configuration cache hit");
            return Ok(value);
        }

        let base_file = self.file_path(&stem);
        let raw = std::fs::read_to_string(&base_file).map_err(|source| {
            ConfigError::FileNotReadable {
                path: base_file.clone(),
                source,
            }
        })?;
        let mut merged = self.decode(&template::merge_fields(&raw, substitutions), &base_file)?;

        for environment in &self.environments {
            let overlay_file = self.environment_file_path(&stem, environment);
            let Ok(raw) = std::fs::read_to_string(&overlay_file) else {
                debug!(
                    %environment,
                    file = %overlay_file.display(),
                    "no readable overlay, skipping"
                );
                continue;
            };
            let overlay =
                self.decode(&template::merge_fields(&raw, substitutions), &overlay_file)?;
            merged = deep_merge(merged, overlay);
        }

        if let Some(cache) = &self.cache {
            cache.set(&stem, merged.clone());
        }

        Ok(merged)
    }

    /// Read the value at a logical path.
    pub fn get(&self, logical_path: &str) -> Result<Value> {
        self.get_with(logical_path, &HashMap::new())
    }

    /// Read with merge-field substitutions (see `load_with`).
    pub fn get_with(
        &self,
        logical_path: &str,
        substitutions: &HashMap<String, String>,
    ) -> Result<Value> {
        let value = self.load_with(logical_path, substitutions)?;
        let keys = path::key_sequence(logical_path);
        Ok(access::resolve(&value, &keys, logical_path)?.clone())
    }

    /// Write `value` at a logical path whose keys all exist already.
    ///
    /// Returns `Ok(false)` when the final file write fails; structural
    /// errors (missing keys, decode failures) return `Err` and commit
    /// nothing.
    pub fn set(&self, logical_path: &str, value: Value) -> Result<bool> {
        self.write(logical_path, value, false)
    }

    /// Write `value` at a logical path, creating missing intermediate maps
    /// along the way.
    pub fn set_forced(&self, logical_path: &str, value: Value) -> Result<bool> {
        self.write(logical_path, value, true)
    }

    fn write(&self, logical_path: &str, value: Value, force: bool) -> Result<bool> {
        let stem = self.file_stem(logical_path);
        let mut full = self.load(logical_path)?;

        let keys = path::key_sequence(logical_path);
        access::assign(&mut full, &keys, value, force, logical_path)?;

        // Writes always target the base file; overlays are read-only.
        let base_file = self.file_path(&stem);
        let encoded = self
            .format
            .encode(&full)
            .map_err(|source| ConfigError::Encode {
                path: base_file.clone(),
                source,
            })?;

        if let Some(cache) = &self.cache {
            cache.set(&stem, full);
        }

        match std::fs::write(&base_file, encoded) {
            Ok(()) => Ok(true),
            Err(err) => {
                warn!(
                    file = %base_file.display(),
                    error = %err,
                    "failed to write configuration file"
                );
                Ok(false)
            }
        }
    }

    fn decode(&self, raw: &str, file: &Path) -> Result<Value> {
        let text = hooks::apply_pre_parsers(&self.pre_parsers, raw);
        let value = self
            .format
            .decode(&text)
            .map_err(|source| ConfigError::Decode {
                path: file.to_path_buf(),
                source,
            })?;
        Ok(hooks::apply_post_parsers(&self.post_parsers, value))
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("format", &self.format)
            .field("directory", &self.directory)
            .field("environments", &self.environments)
            .field("path_parsers", &self.path_parsers.len())
            .field("pre_parsers", &self.pre_parsers.len())
            .field("post_parsers", &self.post_parsers.len())
            .field("cache", &self.cache.is_some())
            .finish()
    }
}
