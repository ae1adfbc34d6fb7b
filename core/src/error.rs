use thiserror::Error;

/// Every failure in the token pipeline is terminal: nothing is retried and a
/// single bad record aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Raw input could not be parsed or did not match the token schema.
    #[error("{0}")]
    Unrecoverable(String),

    /// A caller broke a contract of the pipeline (bad name, bad path, ...).
    #[error("Assertion failed: {0}")]
    Assertion(String),
}

impl TokenError {
    pub fn unrecoverable(message: impl Into<String>) -> Self {
        TokenError::Unrecoverable(message.into())
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        TokenError::Assertion(message.into())
    }

    pub fn is_assertion(&self) -> bool {
        matches!(self, TokenError::Assertion(_))
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;

#[test]
fn test_messages() {
    let err = TokenError::unrecoverable("Failed to parse color data: expected value");
    assert_eq!(err.to_string(), "Failed to parse color data: expected value");
    assert!(!err.is_assertion());

    let err = TokenError::assertion("Cannot merge empty blocks");
    assert_eq!(err.to_string(), "Assertion failed: Cannot merge empty blocks");
    assert!(err.is_assertion());
}
