//! Path-addressed layered configuration.
//!
//! Resolves logical paths like `"app:server:port"` into values read from
//! YAML or JSON files under a configured directory, with:
//! - environment overlay files that deep-merge over the base in
//!   registration order
//! - merge-field substitution of `{name}` placeholders in the raw text
//! - pre-parse (text) and post-parse (value) transform hooks
//! - an optional shared cache keyed by file stem
//!
//! Reads and writes go through the same API: `get` walks the merged
//! structure, `set` mutates it and persists the base file.

pub mod access;
pub mod cache;
pub mod codec;
pub mod configuration;
pub mod error;
pub mod hooks;
pub mod merge;
pub mod path;
pub mod template;

pub use cache::{Cache, RuntimeCache};
pub use codec::Format;
pub use configuration::Configuration;
pub use error::{CodecError, ConfigError};
pub use merge::{deep_merge, deep_merge_all};
