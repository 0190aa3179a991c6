pub mod chat;
pub mod evaluate;
pub mod init;
pub mod quiz;
pub mod remind;
pub mod sequence;
pub mod topics;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use coatutor_backend::config::{load_config_from, TutorConfig};
use coatutor_core::knowledge::KnowledgeBase;
use coatutor_core::model::TopicProfile;
use coatutor_core::parser::load_topics;

/// Config plus the built-in topics extended with any configured topic files.
pub struct Workspace {
    pub config: TutorConfig,
    pub knowledge: KnowledgeBase,
}

impl Workspace {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;

        let mut knowledge = KnowledgeBase::builtin();
        for path in &config.knowledge_paths {
            let topics = load_topics(path)
                .with_context(|| format!("failed to load topics from {}", path.display()))?;
            tracing::debug!("loaded {} topic(s) from {}", topics.len(), path.display());
            knowledge.extend(topics);
        }

        Ok(Self { config, knowledge })
    }

    /// The named topic, or the generic profile when it is unknown.
    pub fn topic(&self, name: &str) -> TopicProfile {
        self.knowledge.get_or_generic(name)
    }
}

/// Split a comma-separated list, dropping blank entries.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
