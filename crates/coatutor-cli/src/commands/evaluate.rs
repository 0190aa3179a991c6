//! The `coatutor evaluate` command.

use std::path::PathBuf;

use anyhow::Result;

use coatutor_core::feedback::review_practice;

use super::Workspace;

pub fn execute(topic: String, text: String, config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::load(config_path)?;
    let profile = workspace.topic(&topic);
    let feedback = review_practice(&profile, &text);

    println!("Topic: {}", feedback.topic);
    println!("Score: {}/100", feedback.score);
    println!("{}", feedback.message);

    if !feedback.missing_steps.is_empty() {
        println!("\nMissing steps:");
        for item in &feedback.missing_steps {
            println!("  - {item}");
        }
    }
    if !feedback.missing_components.is_empty() {
        println!("\nMissing components:");
        for item in &feedback.missing_components {
            println!("  - {item}");
        }
    }

    Ok(())
}
