//! Error types for jedcheck operations.
//!
//! This module defines [`JedError`], the error type used by the host side of
//! the checker (configuration, schema catalog, filesystem), and a [`Result`]
//! type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Problems found *in the analyzed extension* are never errors: rules report
//!   them as diagnostics and keep going
//! - `JedError` covers conditions that stop the host from running a rule at all
//! - Use `anyhow::Error` (via `JedError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jedcheck operations.
#[derive(Debug, Error)]
pub enum JedError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Directory to check does not exist or is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The schema catalog has no document for an extension type.
    #[error("No schema for extension type '{extension_type}'")]
    SchemaNotFound { extension_type: String },

    /// A schema document could not be parsed.
    #[error("Failed to parse schema '{name}': {message}")]
    SchemaParseError { name: String, message: String },

    /// A rule id given on the command line or in config is not registered.
    #[error("Unknown rule: {id}")]
    UnknownRule { id: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for jedcheck operations.
pub type Result<T> = std::result::Result<T, JedError>;
