//! The tutoring / scoring backend seam.
//!
//! Implemented by `coatutor-backend`. The backend is an external
//! collaborator: callers go through [`crate::assist`], which never lets a
//! backend failure reach the student.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::quiz::QuizSubmission;

/// Remote tutor and quiz-scoring service.
#[async_trait]
pub trait TutorBackend: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// `POST /api/tutor`.
    async fn tutor_reply(&self, request: &TutorRequest) -> anyhow::Result<TutorResponse>;

    /// `POST /submit-quiz`.
    async fn submit_quiz(&self, submission: &QuizSubmission) -> anyhow::Result<QuizVerdict>;
}

/// Body of `POST /api/tutor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorRequest {
    pub topic: String,
    pub message: String,
}

/// Reply from `POST /api/tutor`. Either field may carry the text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

impl TutorResponse {
    /// The reply text, preferring `reply` over `response`; blank text counts as absent.
    pub fn text(&self) -> Option<&str> {
        [&self.reply, &self.response]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// Reply from `POST /submit-quiz`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizVerdict {
    #[serde(default)]
    pub predicted_level: Option<String>,
    /// Any other fields the backend sends.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
