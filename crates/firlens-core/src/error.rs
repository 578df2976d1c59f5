//! Error types for FirLens

/// Result type alias using FirLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for FirLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier construction errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failure of a complaint record source.
///
/// Never surfaced by the classifier itself: the init orchestrator turns any
/// variant into a seed-vocabulary fallback.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The backing store could not be reached
    #[error("record source unavailable: {0}")]
    Unavailable(String),

    /// Records came back in a shape we cannot read
    #[error("record schema mismatch: {0}")]
    Schema(String),

    /// The fetch did not finish within the configured bound
    #[error("record fetch timed out")]
    Timeout,

    /// Local IO failure while reading records
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Create a new unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a new schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::config("alpha must be positive").to_string(),
            "configuration error: alpha must be positive"
        );
        assert_eq!(FetchError::Timeout.to_string(), "record fetch timed out");
        assert_eq!(
            FetchError::schema("line 3").to_string(),
            "record schema mismatch: line 3"
        );
    }
}
