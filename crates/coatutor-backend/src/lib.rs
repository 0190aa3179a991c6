//! coatutor-backend — clients for the tutoring / quiz-scoring service.
//!
//! Implements the `TutorBackend` trait over HTTP, plus a mock for tests,
//! and loads the coatutor configuration file.

pub mod config;
pub mod http;
pub mod mock;

pub use coatutor_core::error::BackendError;
pub use config::{create_backend, load_config, load_config_from, BackendConfig, TutorConfig};
pub use http::HttpBackend;
pub use mock::MockBackend;
