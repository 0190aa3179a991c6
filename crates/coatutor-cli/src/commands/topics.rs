//! The `coatutor topics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::Workspace;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::load(config_path)?;

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Kind", "Concepts", "Checklist", "Steps", "Quiz"]);

    for topic in workspace.knowledge.topics() {
        table.add_row(vec![
            Cell::new(&topic.name),
            Cell::new(topic.kind),
            Cell::new(topic.concepts.len()),
            Cell::new(topic.practice_checklist.len()),
            Cell::new(topic.flow_steps.len()),
            Cell::new(topic.quiz.len()),
        ]);
    }

    println!("{table}");
    println!("{} topic(s)", workspace.knowledge.len());

    Ok(())
}
