//! Configuration loading and backend factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use coatutor_core::traits::TutorBackend;

use crate::http::HttpBackend;

/// Connection settings for the tutoring / scoring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL; `/api/tutor` and `/submit-quiz` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3002".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Top-level coatutor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    /// Identifier sent with quiz submissions.
    #[serde(default = "default_student_id")]
    pub student_id: String,
    /// JSON file backing the reminder store.
    #[serde(default = "default_reminders_path")]
    pub reminders_path: PathBuf,
    /// Extra TOML topic files or directories loaded on top of the built-ins.
    #[serde(default)]
    pub knowledge_paths: Vec<PathBuf>,
    /// Fixed RNG seed for reproducible tutor questions.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_student_id() -> String {
    "guest".to_string()
}
fn default_reminders_path() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reminders.json")
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            student_id: default_student_id(),
            reminders_path: default_reminders_path(),
            knowledge_paths: Vec::new(),
            seed: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `coatutor.toml` in the current directory
/// 2. `~/.config/coatutor/config.toml`
///
/// Environment variable overrides: `COATUTOR_BACKEND_URL`, `COATUTOR_STUDENT_ID`.
pub fn load_config() -> Result<TutorConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("coatutor.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TutorConfig::default(),
    };

    if let Ok(url) = std::env::var("COATUTOR_BACKEND_URL") {
        config.backend.base_url = url;
    }
    if let Ok(id) = std::env::var("COATUTOR_STUDENT_ID") {
        config.student_id = id;
    }

    Ok(config)
}

/// Parse a config document and resolve `${VAR}` references.
pub fn parse_config(content: &str) -> Result<TutorConfig> {
    let mut config: TutorConfig = toml::from_str(content)?;
    config.backend.base_url = resolve_env_vars(&config.backend.base_url);
    config.student_id = resolve_env_vars(&config.student_id);
    config.reminders_path = resolve_path(&config.reminders_path);
    config.knowledge_paths = config
        .knowledge_paths
        .iter()
        .map(|p| resolve_path(p))
        .collect();
    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("coatutor"))
}

/// Create the HTTP backend described by the configuration.
pub fn create_backend(config: &BackendConfig) -> Result<Box<dyn TutorBackend>> {
    Ok(Box::new(HttpBackend::new(
        &config.base_url,
        config.timeout_secs,
    )?))
}
