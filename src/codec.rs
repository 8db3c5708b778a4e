//! Format codecs for YAML and JSON configuration files.
//!
//! Both formats decode into `serde_json::Value`, which is the in-memory
//! representation everywhere in this crate. YAML goes through
//! `serde_yaml::from_str::<Value>` so the two formats are interchangeable
//! at the value level.

use crate::error::{CodecError, ConfigError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported configuration file formats. YAML is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// File suffix for this format, including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Yaml => ".yml",
            Format::Json => ".json",
        }
    }

    /// Look up a format by its file suffix.
    ///
    /// Anything outside the closed set fails with `UnsupportedFormat`,
    /// and the message enumerates the supported suffixes.
    pub fn from_extension(ext: &str) -> Result<Self, ConfigError> {
        match ext {
            ".yml" => Ok(Format::Yaml),
            ".json" => Ok(Format::Json),
            other => Err(ConfigError::UnsupportedFormat {
                given: other.to_string(),
            }),
        }
    }

    /// Decode raw text into a structured value.
    pub fn decode(&self, raw: &str) -> Result<Value, CodecError> {
        match self {
            Format::Yaml => Ok(serde_yaml::from_str(raw)?),
            Format::Json => Ok(serde_json::from_str(raw)?),
        }
    }

    /// Encode a structured value back into text.
    ///
    /// JSON output is pretty-printed so written files stay reviewable.
    pub fn encode(&self, value: &Value) -> Result<String, CodecError> {
        match self {
            Format::Yaml => Ok(serde_yaml::to_string(value)?),
            Format::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_is_the_default_format() {
        assert_eq!(Format::default(), Format::Yaml);
    }

    #[test]
    fn test_extension_round_trip() {
        for format in [Format::Yaml, Format::Json] {
            assert_eq!(Format::from_extension(format.extension()).unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = Format::from_extension(".toml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid format: .toml, supported formats are: .json, .yml"
        );
    }

    #[test]
    fn test_decode_yaml() {
        let value = Format::Yaml.decode("numbers:\n  - 1\n  - 2\n  - 3\n").unwrap();
        assert_eq!(value, json!({"numbers": [1, 2, 3]}));
    }

    #[test]
    fn test_decode_json() {
        let value = Format::Json.decode(r#"{"numbers": [1, 2, 3]}"#).unwrap();
        assert_eq!(value, json!({"numbers": [1, 2, 3]}));
    }

    #[test]
    fn test_decode_malformed_json_fails() {
        assert!(Format::Json.decode("{not json").is_err());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let value = json!({"name": "My App", "level": {"one": {"two": true}}});
        for format in [Format::Yaml, Format::Json] {
            let text = format.encode(&value).unwrap();
            assert_eq!(format.decode(&text).unwrap(), value);
        }
    }

    #[test]
    fn test_json_encodes_pretty() {
        let text = Format::Json.encode(&json!({"a": 1})).unwrap();
        assert!(text.contains('\n'));
    }
}
