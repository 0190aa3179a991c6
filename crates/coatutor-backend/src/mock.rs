//! Mock backend for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use coatutor_core::error::BackendError;
use coatutor_core::quiz::QuizSubmission;
use coatutor_core::traits::{QuizVerdict, TutorBackend, TutorRequest, TutorResponse};

/// A mock backend for exercising the fallback paths without a server.
pub struct MockBackend {
    /// Reply text; `None` makes every call fail as unreachable.
    reply: Option<String>,
    /// Level returned by quiz submissions.
    level: Option<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last tutor request received.
    last_request: Mutex<Option<TutorRequest>>,
}

impl MockBackend {
    /// Create a mock that always answers with the same reply.
    pub fn with_fixed_reply(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            level: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock whose every call fails as if the backend were down.
    pub fn unavailable() -> Self {
        Self {
            reply: None,
            level: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Set the level returned from quiz submissions.
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = Some(level.to_string());
        self
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last tutor request made to this backend.
    pub fn last_request(&self) -> Option<TutorRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TutorBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn tutor_reply(&self, request: &TutorRequest) -> anyhow::Result<TutorResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        match &self.reply {
            Some(reply) => Ok(TutorResponse {
                reply: Some(reply.clone()),
                response: None,
            }),
            None => Err(BackendError::Unavailable("mock backend is down".into()).into()),
        }
    }

    async fn submit_quiz(&self, _submission: &QuizSubmission) -> anyhow::Result<QuizVerdict> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if self.reply.is_none() {
            return Err(BackendError::Unavailable("mock backend is down".into()).into());
        }
        Ok(QuizVerdict {
            predicted_level: self.level.clone(),
            ..Default::default()
        })
    }
}
