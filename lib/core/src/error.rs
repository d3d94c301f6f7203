use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Inference pipeline failures.
///
/// Every variant is recoverable at the HTTP boundary: the pipeline never
/// terminates the process, and only the categorized message (never an
/// internal fault dump) is surfaced to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request body carried no recognizable `input` array.
    #[error("Missing input field")]
    MissingInput,

    /// The input length differs from the schema. Strict equality: no
    /// padding, no truncation, no defaulting of trailing features.
    #[error("Expected {expected} features, got {received}")]
    FeatureCountMismatch { expected: usize, received: usize },

    /// An element could not be coerced to a finite real number.
    #[error("Invalid value at position {index}: {value} is not numeric")]
    MalformedValue { index: usize, value: String },

    /// No model was installed at startup.
    #[error("Model not loaded")]
    ModelUnavailable,
}

/// Coarse grouping the HTTP boundary maps to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller-input problem.
    Client,
    /// Server-side precondition failure.
    Server,
}

impl Error {
    /// Category for status-code mapping. A missing model is the one
    /// server-side condition; everything else is the caller's input.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ModelUnavailable => ErrorCategory::Server,
            _ => ErrorCategory::Client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::MissingInput.to_string(), "Missing input field");
        assert_eq!(
            Error::FeatureCountMismatch {
                expected: 27,
                received: 26
            }
            .to_string(),
            "Expected 27 features, got 26"
        );
        assert_eq!(
            Error::MalformedValue {
                index: 3,
                value: "\"abc\"".to_string()
            }
            .to_string(),
            "Invalid value at position 3: \"abc\" is not numeric"
        );
        assert_eq!(Error::ModelUnavailable.to_string(), "Model not loaded");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::MissingInput.category(), ErrorCategory::Client);
        assert_eq!(
            Error::FeatureCountMismatch {
                expected: 27,
                received: 26
            }
            .category(),
            ErrorCategory::Client
        );
        assert_eq!(
            Error::MalformedValue {
                index: 0,
                value: "null".to_string()
            }
            .category(),
            ErrorCategory::Client
        );
        assert_eq!(Error::ModelUnavailable.category(), ErrorCategory::Server);
    }
}
