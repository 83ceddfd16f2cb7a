//! jedcheck - Static checks for packaged Joomla extensions.
//!
//! jedcheck reads an extension's source tree and reports problems in its
//! XML manifests, its INI language files and the files the manifests
//! declare, without installing anything.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.jedcheck.yml` loading and validation
//! - [`error`] - Error types and result aliases
//! - [`language`] - INI language file linting and translation lookup
//! - [`lint`] - Rules, registry, reports and output formatters
//! - [`manifest`] - Manifest parsing and schema validation
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use jedcheck::language::lint;
//! use jedcheck::lint::Severity;
//!
//! let findings = lint(&["MOD_HELLO=\"Hello\"", "mod_bye=\"Bye\""]);
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].severity, Severity::Warning);
//! assert_eq!(findings[0].line, Some(2));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod lint;
pub mod manifest;
pub mod ui;

pub use error::{JedError, Result};
