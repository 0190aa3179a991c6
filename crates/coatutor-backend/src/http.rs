//! HTTP tutoring / scoring backend.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use coatutor_core::error::BackendError;
use coatutor_core::quiz::QuizSubmission;
use coatutor_core::traits::{QuizVerdict, TutorBackend, TutorRequest, TutorResponse};

const DEFAULT_BASE_URL: &str = "http://localhost:3002";

/// Backend reached over plain JSON-over-HTTP.
pub struct HttpBackend {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, route: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{route}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    BackendError::Unavailable(format!("backend not reachable at {}", self.base_url))
                } else {
                    BackendError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::ApiError {
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(format!("{route}: {e}")))
    }
}

#[async_trait]
impl TutorBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(topic = %request.topic))]
    async fn tutor_reply(&self, request: &TutorRequest) -> anyhow::Result<TutorResponse> {
        let response = self.post_json("/api/tutor", request).await?;
        tracing::debug!("tutor reply received");
        Ok(response)
    }

    #[instrument(skip(self, submission), fields(topic = %submission.topic))]
    async fn submit_quiz(&self, submission: &QuizSubmission) -> anyhow::Result<QuizVerdict> {
        let verdict: QuizVerdict = self.post_json("/submit-quiz", submission).await?;
        tracing::debug!(level = ?verdict.predicted_level, "quiz scored");
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> TutorRequest {
        TutorRequest {
            topic: "Instruction Cycle".into(),
            message: "what is fetch?".into(),
        }
    }

    fn submission() -> QuizSubmission {
        QuizSubmission {
            student_id: "s-1".into(),
            topic: "Cache Memory".into(),
            total_questions: 3,
            correct_answers: 2,
            time_taken_seconds: 41,
            attempts: 3,
        }
    }

    #[tokio::test]
    async fn successful_tutor_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tutor"))
            .and(body_json(serde_json::json!({
                "topic": "Instruction Cycle",
                "message": "what is fetch?"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reply": "What does the PC hold?"})),
            )
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri(), 5).unwrap();
        let response = backend.tutor_reply(&request()).await.unwrap();
        assert_eq!(response.text(), Some("What does the PC hold?"));
    }

    #[tokio::test]
    async fn quiz_submission_is_camel_case() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submit-quiz"))
            .and(body_json(serde_json::json!({
                "studentId": "s-1",
                "topic": "Cache Memory",
                "totalQuestions": 3,
                "correctAnswers": 2,
                "timeTakenSeconds": 41,
                "attempts": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"predicted_level": "Intermediate", "confidence": 0.8}),
            ))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&format!("{}/", server.uri()), 5).unwrap();
        let verdict = backend.submit_quiz(&submission()).await.unwrap();
        assert_eq!(verdict.predicted_level.as_deref(), Some("Intermediate"));
        assert!(verdict.extra.contains_key("confidence"));
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tutor"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri(), 5).unwrap();
        let err = backend.tutor_reply(&request()).await.unwrap_err();
        match err.downcast_ref::<BackendError>() {
            Some(BackendError::ApiError { status, message }) => {
                assert_eq!(*status, 503);
                assert_eq!(message, "model loading");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submit-quiz"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri(), 5).unwrap();
        let err = backend.submit_quiz(&submission()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackendError>(),
            Some(BackendError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tutor"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reply": "late"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri(), 1).unwrap();
        let err = backend.tutor_reply(&request()).await.unwrap_err();
        let backend_err = err.downcast_ref::<BackendError>().unwrap();
        assert!(matches!(backend_err, BackendError::Timeout(1)));
        assert!(backend_err.is_transport());
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        // Nothing listens on port 9 (discard) in the test environment.
        let backend = HttpBackend::new("http://127.0.0.1:9", 2).unwrap();
        let err = backend.tutor_reply(&request()).await.unwrap_err();
        assert!(err
            .downcast_ref::<BackendError>()
            .is_some_and(BackendError::is_transport));
    }
}
