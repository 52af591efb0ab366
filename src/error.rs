//! Error types for algoviz.
//!
//! Step generation never fails: malformed input becomes a renderable
//! terminal step. Errors only come from the edges of the system
//! (configuration, catalog lookups, serialization, I/O).

use thiserror::Error;

/// Result type alias for algoviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all algoviz operations.
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Playback Errors =====
    /// Speed multiplier outside the supported range or off the 0.5 grid.
    #[error("Invalid speed {0}: expected 0.5 to 3.0 in steps of 0.5")]
    InvalidSpeed(f64),

    // ===== Catalog Errors =====
    /// No problem with this number in the catalog.
    #[error("Unknown problem: {0}")]
    UnknownProblem(u32),

    /// No problem with this name in the catalog.
    #[error("Unknown problem: '{0}'")]
    UnknownProblemName(String),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = VizError::config("speed out of range");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("speed out of range"));
    }

    #[test]
    fn test_serialization_error() {
        let err = VizError::serialization("bad json");
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_io_error() {
        let err = VizError::io("disk on fire");
        assert!(matches!(err, VizError::Io(_)));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_invalid_speed_display() {
        let err = VizError::InvalidSpeed(3.5);
        let msg = err.to_string();
        assert!(msg.contains("3.5"));
        assert!(msg.contains("0.5 to 3.0"));
    }

    #[test]
    fn test_unknown_problem_display() {
        let err = VizError::UnknownProblem(42);
        assert_eq!(err.to_string(), "Unknown problem: 42");
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("{{{{").unwrap_err();
        let err: VizError = yaml_err.into();
        assert!(matches!(err, VizError::YamlParse(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: VizError = json_err.into();
        assert!(matches!(err, VizError::Serialization(_)));
    }
}
