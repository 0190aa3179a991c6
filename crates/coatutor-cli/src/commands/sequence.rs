//! The `coatutor sequence` command.

use std::path::PathBuf;

use anyhow::Result;

use coatutor_core::model::ChecklistKind;
use coatutor_core::sequence::validate_sequence;

use super::{split_list, Workspace};

pub fn execute(
    topic: String,
    steps: String,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let workspace = Workspace::load(config_path)?;
    let profile = workspace.topic(&topic);

    anyhow::ensure!(
        profile.kind == ChecklistKind::Sequence && !profile.flow_steps.is_empty(),
        "topic '{}' has no process flow to order",
        profile.name
    );

    let user_steps = split_list(&steps);
    let outcome = validate_sequence(&user_steps, &profile.flow_steps);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.message);
        if !outcome.valid {
            println!("Expected: {}", profile.flow_steps.join(" -> "));
        }
    }

    Ok(())
}
