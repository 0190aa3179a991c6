//! The `coatutor validate` command.

use std::path::PathBuf;

use anyhow::Result;

use coatutor_backend::config::load_config_from;
use coatutor_core::parser::{load_topics, validate_topics};

pub fn execute(knowledge_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let paths = match knowledge_path {
        Some(path) => vec![path],
        None => {
            let config = load_config_from(config_path.as_deref())?;
            anyhow::ensure!(
                !config.knowledge_paths.is_empty(),
                "no --knowledge path given and no knowledge_paths configured"
            );
            config.knowledge_paths
        }
    };

    let mut topics = Vec::new();
    for path in &paths {
        let loaded = load_topics(path)?;
        anyhow::ensure!(!loaded.is_empty(), "no topics found in {}", path.display());
        topics.extend(loaded);
    }

    for topic in &topics {
        println!(
            "Topic: {} ({}, {} checklist items, {} quiz questions)",
            topic.name,
            topic.kind,
            topic.practice_checklist.len(),
            topic.quiz.len()
        );
    }

    let warnings = validate_topics(&topics);
    for w in &warnings {
        let prefix = w
            .topic
            .as_ref()
            .map(|name| format!("  [{name}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All topics valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
