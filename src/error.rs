use thiserror::Error;

/// Unified error type for git-versioner operations
#[derive(Error, Debug)]
pub enum VersionerError {
    #[error("Repository has no commits: HEAD cannot be resolved")]
    NoHead,

    #[error("Tag '{tag}' does not resolve to a commit (found {kind})")]
    MalformedTag { tag: String, kind: String },

    #[error("Invalid identifier '{value}': expected {expected}")]
    InvalidIdentifier { value: String, expected: String },

    #[error("Object read failed: {0}")]
    ObjectRead(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Property codec error: {0}")]
    Codec(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-versioner
pub type Result<T> = std::result::Result<T, VersionerError>;

impl VersionerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionerError::Config(msg.into())
    }

    /// Create a codec error with context
    pub fn codec(msg: impl Into<String>) -> Self {
        VersionerError::Codec(msg.into())
    }

    /// Create an identifier validation error naming the value and the expected shape
    pub fn invalid_identifier(value: impl Into<String>, expected: impl Into<String>) -> Self {
        VersionerError::InvalidIdentifier {
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a malformed tag error
    pub fn malformed_tag(tag: impl Into<String>, kind: impl Into<String>) -> Self {
        VersionerError::MalformedTag {
            tag: tag.into(),
            kind: kind.into(),
        }
    }
}

impl From<toml::de::Error> for VersionerError {
    fn from(err: toml::de::Error) -> Self {
        VersionerError::Config(err.to_string())
    }
}

impl From<regex::Error> for VersionerError {
    fn from(err: regex::Error) -> Self {
        VersionerError::Config(format!("invalid regex: {}", err))
    }
}

impl From<serde_json::Error> for VersionerError {
    fn from(err: serde_json::Error) -> Self {
        VersionerError::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VersionerError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VersionerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_identifier_names_value_and_pattern() {
        let err = VersionerError::invalid_identifier("0001234", "no leading zeros");
        let msg = err.to_string();
        assert!(msg.contains("0001234"));
        assert!(msg.contains("no leading zeros"));
    }

    #[test]
    fn test_malformed_tag_display() {
        let err = VersionerError::malformed_tag("v1.0.0", "tree");
        assert_eq!(
            err.to_string(),
            "Tag 'v1.0.0' does not resolve to a commit (found tree)"
        );
    }

    #[test]
    fn test_no_head_display() {
        assert!(VersionerError::NoHead.to_string().contains("no commits"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (VersionerError::config("x"), "Configuration error"),
            (VersionerError::codec("x"), "Property codec error"),
            (
                VersionerError::invalid_identifier("x", "y"),
                "Invalid identifier",
            ),
            (VersionerError::malformed_tag("x", "blob"), "Tag 'x'"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_regex_error_becomes_config_error() {
        let err: VersionerError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, VersionerError::Config(_)));
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let err: VersionerError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
