//! Extension checks.
//!
//! This module runs a set of rules over an extension's source tree and
//! collects what they find.
//!
//! # Overview
//!
//! - **Rules** - Individual checks ([`Rule`] trait)
//! - **Registry** - Collection of all available rules ([`RuleRegistry`])
//! - **Report** - Diagnostics produced by a run ([`Report`], [`Diagnostic`])
//! - **Output** - Human, JSON and SARIF formatters ([`DiagnosticFormatter`])
//!
//! # Example
//!
//! ```
//! use jedcheck::config::JedConfig;
//! use jedcheck::lint::{RuleId, RuleRegistry, Severity};
//!
//! let registry = RuleRegistry::with_builtins(&JedConfig::default()).unwrap();
//! assert!(registry.get(&RuleId::new("LANG")).is_some());
//!
//! // Compat notes sit outside the severity order
//! assert!(Severity::Info < Severity::Warning);
//! assert!(Severity::Compat.partial_cmp(&Severity::Error).is_none());
//! ```

pub mod diagnostic;
pub mod discovery;
pub mod output;
pub mod registry;
pub mod report;
pub mod rule;
pub mod rules;

pub use diagnostic::{Diagnostic, Finding, Severity};
pub use discovery::find_files;
pub use output::{DiagnosticFormatter, HumanFormatter, JsonFormatter, OutputFormat, SarifFormatter};
pub use registry::{run, RuleRegistry};
pub use report::{Report, RuleReport};
pub use rule::{Rule, RuleContext, RuleId};
pub use rules::{EncodingRule, LanguageRule, ManifestRule, XmlFilesRule, XmlInfoRule};
