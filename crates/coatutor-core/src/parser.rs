//! TOML topic file parser.
//!
//! Loads extra topic profiles from TOML files and directories, and
//! validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{ChecklistKind, Concept, QuizQuestion, SocraticBanks, TopicProfile};

/// Intermediate TOML structure for topic files.
#[derive(Debug, Deserialize)]
struct TomlTopicFile {
    #[serde(default)]
    topics: Vec<TomlTopic>,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    name: String,
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default)]
    concepts: Vec<TomlConcept>,
    #[serde(default)]
    checklist: Vec<String>,
    #[serde(default)]
    flow_steps: Vec<String>,
    #[serde(default)]
    socratic: Option<TomlSocratic>,
    #[serde(default)]
    quiz: Vec<TomlQuestion>,
}

fn default_kind() -> String {
    "components".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlConcept {
    keyword: String,
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct TomlSocratic {
    #[serde(default)]
    purpose: Vec<String>,
    #[serde(default)]
    system_level: Vec<String>,
    #[serde(default)]
    components: Vec<String>,
    #[serde(default)]
    data_flow: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    answer: usize,
    #[serde(default)]
    explanation: String,
}

/// Parse a single TOML topic file.
pub fn parse_topic_file(path: &Path) -> Result<Vec<TopicProfile>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read topic file: {}", path.display()))?;

    parse_topics_str(&content, path)
}

/// Parse TOML topic definitions from a string (useful for testing).
pub fn parse_topics_str(content: &str, source_path: &Path) -> Result<Vec<TopicProfile>> {
    let parsed: TomlTopicFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    parsed
        .topics
        .into_iter()
        .map(|t| {
            let kind: ChecklistKind = t
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("topic '{}': {}", t.name, e))?;

            let socratic = t
                .socratic
                .map(|s| SocraticBanks {
                    purpose: s.purpose,
                    system_level: s.system_level,
                    components: s.components,
                    data_flow: s.data_flow,
                })
                .unwrap_or_default();

            Ok(TopicProfile {
                name: t.name,
                kind,
                concepts: t
                    .concepts
                    .into_iter()
                    .map(|c| Concept {
                        keyword: c.keyword,
                        explanation: c.explanation,
                    })
                    .collect(),
                practice_checklist: t.checklist,
                flow_steps: t.flow_steps,
                socratic,
                quiz: t
                    .quiz
                    .into_iter()
                    .map(|q| QuizQuestion {
                        prompt: q.prompt,
                        options: q.options,
                        answer: q.answer,
                        explanation: q.explanation,
                    })
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>>>()
}

/// Load topics from a file, or recursively from every `.toml` file in a directory.
pub fn load_topics(path: &Path) -> Result<Vec<TopicProfile>> {
    if path.is_dir() {
        load_topic_directory(path)
    } else {
        parse_topic_file(path)
    }
}

/// Recursively load all `.toml` topic files from a directory.
pub fn load_topic_directory(dir: &Path) -> Result<Vec<TopicProfile>> {
    let mut topics = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            topics.extend(load_topic_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_topic_file(&path) {
                Ok(parsed) => topics.extend(parsed),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(topics)
}

/// A warning from topic validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The topic name (if applicable).
    pub topic: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate topic profiles for common authoring mistakes.
pub fn validate_topics(topics: &[TopicProfile]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |topic: &TopicProfile, message: String| ValidationWarning {
        topic: Some(topic.name.clone()),
        message,
    };

    let mut seen = std::collections::HashSet::new();
    for topic in topics {
        if !seen.insert(topic.name.to_lowercase()) {
            warnings.push(warn(topic, format!("duplicate topic name: {}", topic.name)));
        }

        if topic.practice_checklist.is_empty() {
            warnings.push(warn(topic, "checklist is empty; every answer will score 100".into()));
        }

        if topic.kind == ChecklistKind::Sequence && topic.flow_steps.is_empty() {
            warnings.push(warn(topic, "sequence topic has no flow_steps".into()));
        }

        let mut steps = std::collections::HashSet::new();
        for step in &topic.flow_steps {
            if !steps.insert(step.trim().to_lowercase()) {
                warnings.push(warn(
                    topic,
                    format!("duplicate flow step '{step}' (only the first counts)"),
                ));
            }
        }

        for concept in &topic.concepts {
            if concept.explanation.trim().is_empty() {
                warnings.push(warn(
                    topic,
                    format!("concept '{}' has no explanation", concept.keyword),
                ));
            }
        }

        if topic.socratic.is_empty() {
            warnings.push(warn(
                topic,
                "no socratic questions; generic questions will be used".into(),
            ));
        }

        for (i, q) in topic.quiz.iter().enumerate() {
            if q.answer >= q.options.len() {
                warnings.push(warn(
                    topic,
                    format!(
                        "quiz question {} answer index {} is out of range ({} options)",
                        i + 1,
                        q.answer,
                        q.options.len()
                    ),
                ));
            }
        }
    }

    warnings
}
