//! The `coatutor init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("coatutor.toml"));
    if config_path.exists() {
        println!("{} already exists, skipping.", config_path.display());
    } else {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(&config_path, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        println!("Created {}", config_path.display());
    }

    std::fs::create_dir_all("topics")?;
    let example_path = std::path::Path::new("topics/example.toml");
    if example_path.exists() {
        println!("topics/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TOPICS)?;
        println!("Created topics/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point backend.base_url in coatutor.toml at your tutoring service");
    println!("  2. Run: coatutor validate --knowledge topics/example.toml");
    println!("  3. Run: coatutor chat --topic Interrupts");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# coatutor configuration

student_id = "${USER}"
reminders_path = "${HOME}/.config/coatutor/reminders.json"
knowledge_paths = ["topics"]

[backend]
base_url = "http://localhost:3002"
timeout_secs = 30
"#;

const EXAMPLE_TOPICS: &str = r#"[[topics]]
name = "Interrupts"
kind = "sequence"
checklist = [
    "Mention Interrupt Request",
    "Mention Save Context",
    "Mention Service Routine",
    "Mention Restore Context",
]
flow_steps = ["Interrupt Request", "Save Context", "Service Routine", "Restore Context"]

[[topics.concepts]]
keyword = "isr"
explanation = "The interrupt service routine is the handler that runs in response to an interrupt."

[[topics.concepts]]
keyword = "vector table"
explanation = "The vector table maps each interrupt number to the address of its service routine."

[topics.socratic]
purpose = ["Why would a processor want to be interrupted instead of polling?"]
system_level = ["What has to happen to the running program when {topic} occur?"]
components = ["How does {concept} fit into handling an interrupt?"]
data_flow = ["Which registers must be saved before the handler runs, and why?"]

[[topics.quiz]]
prompt = "What runs in response to an interrupt?"
options = ["The interrupt service routine", "The bootloader", "The compiler"]
answer = 0
explanation = "The CPU jumps to the service routine registered for that interrupt."
"#;
