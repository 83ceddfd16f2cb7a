//! Configuration loading for jedcheck.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use jedcheck::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".jedcheck.yml"), "disabled_rules: [ENCODING]").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.disabled_rules, vec!["ENCODING".to_string()]);
//! ```
//!
//! # Configuration File Location
//!
//! `--config PATH` when given, otherwise `.jedcheck.yml` in the checked
//! directory. Without either, every setting has its default.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, load_config, load_config_file, parse_config, validate, CONFIG_FILE_NAME,
};
pub use schema::{EncodingSettings, InfoSettings, JedConfig};
