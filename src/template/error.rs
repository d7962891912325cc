//! Template store error types

use std::path::PathBuf;

use thiserror::Error;

use crate::error::FaultKind;

/// Errors that can occur while storing or loading templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{name}' not found at {path}")]
    NotFound { name: String, path: PathBuf },

    #[error("Invalid template name: {0:?}")]
    InvalidName(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    #[error("Mapping key {0:?} is reserved for YAML merges")]
    ReservedKey(String),
}

impl TemplateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TemplateError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            TemplateError::NotFound { .. } => FaultKind::NotFound,
            TemplateError::InvalidName(_) => FaultKind::InvalidName,
            TemplateError::Io { .. } => FaultKind::Io,
            TemplateError::Yaml(_) | TemplateError::TooDeep { .. } | TemplateError::ReservedKey(_) => {
                FaultKind::Serialization
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TemplateError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = TemplateError::NotFound {
            name: "greeting".to_string(),
            path: PathBuf::from("t/greeting.yaml"),
        };
        assert_eq!(err.to_string(), "Template 'greeting' not found at t/greeting.yaml");
        assert!(err.is_not_found());
        assert_eq!(err.kind(), FaultKind::NotFound);
    }

    #[test]
    fn test_io_kind() {
        let err = TemplateError::io(
            "t/x.yaml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), FaultKind::Io);
        assert!(err.to_string().contains("denied"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_serialization_kinds() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("{ unclosed").unwrap_err();
        assert_eq!(TemplateError::from(yaml_err).kind(), FaultKind::Serialization);
        assert_eq!(TemplateError::TooDeep { limit: 3 }.kind(), FaultKind::Serialization);
        assert_eq!(TemplateError::ReservedKey("<<".to_string()).kind(), FaultKind::Serialization);
    }
}
