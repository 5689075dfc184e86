//! Crate error types
//!
//! The pipeline operations themselves never fail: empty input yields empty
//! output and malformed previous-entity data falls back to fresh generation.
//! Errors only occur while building an engine — loading lexicon tables or
//! compiling detection patterns.

use thiserror::Error;

/// Main masque error type
#[derive(Debug, Error)]
pub enum MasqueError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Lexicon table loading or validation errors
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Detection pattern compilation errors
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MasqueError>;

impl From<std::io::Error> for MasqueError {
    fn from(err: std::io::Error) -> Self {
        MasqueError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for MasqueError {
    fn from(err: toml::de::Error) -> Self {
        MasqueError::Lexicon(format!("TOML parse error: {err}"))
    }
}

impl From<regex::Error> for MasqueError {
    fn from(err: regex::Error) -> Self {
        MasqueError::Pattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MasqueError::Configuration("bad style".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad style");
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = valid = toml").unwrap_err();
        let err: MasqueError = toml_err.into();
        assert!(matches!(err, MasqueError::Lexicon(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: MasqueError = regex_err.into();
        assert!(matches!(err, MasqueError::Pattern(_)));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = MasqueError::Pattern("boom".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
