//! Configuration file discovery and loading.

use crate::config::schema::JedConfig;
use crate::error::{JedError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the configuration file looked up in the checked directory.
pub const CONFIG_FILE_NAME: &str = ".jedcheck.yml";

static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}-[A-Z]{2}$").expect("LANGUAGE_TAG must compile")
});

/// Find `.jedcheck.yml` directly inside `base_dir`.
pub fn find_config(base_dir: &Path) -> Option<PathBuf> {
    let path = base_dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if a value is out of range.
pub fn load_config_file(path: &Path) -> Result<JedConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            JedError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            JedError::Io(e)
        }
    })?;

    let mut config = parse_config(&content, path)?;

    // A relative schema directory is relative to the file that names it.
    if let (Some(schemas), Some(dir)) = (&config.schemas, path.parent()) {
        if schemas.is_relative() {
            config.schemas = Some(dir.join(schemas));
        }
    }

    Ok(config)
}

/// Parse and validate YAML content.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<JedConfig> {
    let config: JedConfig =
        serde_yaml::from_str(content).map_err(|e| JedError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    validate(&config)?;
    Ok(config)
}

/// Check values serde cannot check.
pub fn validate(config: &JedConfig) -> Result<()> {
    if !LANGUAGE_TAG.is_match(&config.info.language_tag) {
        return Err(JedError::ConfigValidationError {
            message: format!(
                "info.language_tag '{}' is not a language tag like en-GB",
                config.info.language_tag
            ),
        });
    }
    Ok(())
}

/// Load config with optional path override.
///
/// An explicit path must exist. Otherwise `.jedcheck.yml` in `base_dir` is
/// used when present, and the defaults when not.
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<JedConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    match find_config(base_dir) {
        Some(path) => {
            tracing::debug!("Using config {}", path.display());
            load_config_file(&path)
        }
        None => Ok(JedConfig::default()),
    }
}
