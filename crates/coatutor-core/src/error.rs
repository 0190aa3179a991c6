//! Error types shared across coatutor crates.
//!
//! `BackendError` is defined here rather than in `coatutor-backend` so the
//! fallback layer in [`crate::assist`] can classify failures without string
//! matching.

use thiserror::Error;

/// Errors that can occur when talking to the tutoring / scoring backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached at all.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with an error status.
    #[error("backend error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The backend answered 2xx but the body could not be decoded.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    /// Returns `true` for failures caused by the network rather than the backend logic.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Unavailable(_) | BackendError::Timeout(_))
    }
}

/// Illegal transitions of the quiz flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The topic has no quiz questions.
    #[error("topic '{0}' has no quiz questions")]
    NoQuestions(String),

    /// The requested operation is not valid in the current phase.
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    /// The chosen option does not exist for the current question.
    #[error("option {choice} is out of range (question has {options} options)")]
    ChoiceOutOfRange { choice: usize, options: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification() {
        assert!(BackendError::Timeout(30).is_transport());
        assert!(BackendError::Unavailable("refused".into()).is_transport());
        assert!(!BackendError::ApiError {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
    }

    #[test]
    fn quiz_error_messages() {
        let err = QuizError::InvalidTransition {
            action: "answer",
            phase: "idle",
        };
        assert_eq!(err.to_string(), "cannot answer while idle");
    }
}
