//! Error types for metaprompt
//!
//! Centralized error handling using thiserror. Module errors (`TemplateError`,
//! `LlmError`) each report a [`FaultKind`], which is what the total public
//! operations log before downgrading a failure to `false`/`None`.

use std::fmt;

use thiserror::Error;

/// Closed set of fault categories surfaced by store, load and execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Requested template does not exist
    NotFound,
    /// Template name cannot be used as a filename stem
    InvalidName,
    /// Filesystem read/write failure
    Io,
    /// Document could not be encoded or decoded
    Serialization,
    /// The model service rejected or failed the call
    RemoteCall,
    /// Anything else
    Unexpected,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::NotFound => "not-found",
            FaultKind::InvalidName => "invalid-name",
            FaultKind::Io => "io",
            FaultKind::Serialization => "serialization",
            FaultKind::RemoteCall => "remote-call",
            FaultKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while setting up the application (config and credentials).
///
/// Template and model failures stay in their own module errors.
#[derive(Debug, Error)]
pub enum MetapromptError {
    /// Credential could not be resolved at startup
    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },

    /// Configuration file problem
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for metaprompt operations
pub type Result<T> = std::result::Result<T, MetapromptError>;
