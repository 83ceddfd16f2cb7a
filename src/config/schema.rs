//! Configuration schema definitions for jedcheck.
//!
//! This module contains the struct definitions that map to the
//! `.jedcheck.yml` file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.jedcheck.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JedConfig {
    /// Rule ids that are never run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disabled_rules: Vec<String>,

    /// Settings of the encoding rule.
    pub encoding: EncodingSettings,

    /// Settings of the manifest info rule.
    pub info: InfoSettings,

    /// Directory with `dtd_<type>.json` documents replacing the built-in ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<PathBuf>,
}

/// Settings of the `ENCODING` rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingSettings {
    /// Comma-separated substrings to look for in PHP files.
    pub encodings: String,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            encodings: "base64".to_string(),
        }
    }
}

impl EncodingSettings {
    /// The configured substrings, trimmed, without empty entries.
    pub fn list(&self) -> Vec<String> {
        self.encodings
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Settings of the `INFO_XML` rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfoSettings {
    /// Language whose `.sys.ini` file resolves the extension name.
    pub language_tag: String,

    /// Author URL domains that may contain "joom".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub approved_domains: Vec<String>,
}

impl Default for InfoSettings {
    fn default() -> Self {
        Self {
            language_tag: "en-GB".to_string(),
            approved_domains: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: JedConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, JedConfig::default());
        assert_eq!(config.info.language_tag, "en-GB");
        assert_eq!(config.encoding.list(), vec!["base64"]);
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
disabled_rules: [ENCODING]
encoding:
  encodings: "base64, str_rot13,,"
info:
  language_tag: de-DE
  approved_domains: [joomla.org, joomlacode.org]
schemas: dtd
"#;
        let config: JedConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.disabled_rules, vec!["ENCODING"]);
        assert_eq!(config.encoding.list(), vec!["base64", "str_rot13"]);
        assert_eq!(config.info.language_tag, "de-DE");
        assert_eq!(config.info.approved_domains.len(), 2);
        assert_eq!(config.schemas, Some(PathBuf::from("dtd")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<JedConfig>("rules: []").is_err());
        assert!(serde_yaml::from_str::<JedConfig>("info:\n  tag: en-GB").is_err());
    }

    #[test]
    fn serializes_without_empty_fields() {
        let yaml = serde_yaml::to_string(&JedConfig::default()).unwrap();
        assert!(!yaml.contains("disabled_rules"));
        assert!(!yaml.contains("schemas"));
        assert!(yaml.contains("language_tag: en-GB"));
    }
}
