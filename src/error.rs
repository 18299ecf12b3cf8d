//! Error handling for the outer layers of diskplan
//!
//! Domain problems with a configuration (bad sizes, duplicate LUNs, limit
//! breaches) are never errors: they are reported by the validator. These
//! types cover what can go wrong around the engine: reading files, parsing
//! JSON and command-line misuse.

use thiserror::Error;

/// Main error type for diskplan
#[derive(Error, Debug)]
pub enum DiskPlanError {
    /// IO errors (reading or writing configuration and template files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A plan was checked and found invalid
    #[error("Validation failed: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiskPlanError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiskPlanError::config("missing instanceSize");
        assert_eq!(err.to_string(), "Configuration error: missing instanceSize");

        let err = DiskPlanError::validation("2 error(s)");
        assert_eq!(err.to_string(), "Validation failed: 2 error(s)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DiskPlanError = io_err.into();
        assert!(matches!(err, DiskPlanError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DiskPlanError = json_err.into();
        assert!(matches!(err, DiskPlanError::Json(_)));
    }
}
