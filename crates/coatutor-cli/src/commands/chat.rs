//! The `coatutor chat` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use coatutor_backend::create_backend;
use coatutor_core::assist::{ask_tutor, ReplySource};
use coatutor_core::socratic::SocraticSession;

use super::Workspace;

pub async fn execute(
    topic: String,
    seed: Option<u64>,
    remote: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let workspace = Workspace::load(config_path)?;
    let profile = workspace.topic(&topic);

    let mut session = match seed.or(workspace.config.seed) {
        Some(seed) => SocraticSession::with_seed(profile, seed),
        None => SocraticSession::from_os_rng(profile),
    };

    let backend = if remote {
        Some(create_backend(&workspace.config.backend)?)
    } else {
        None
    };

    eprintln!(
        "Chatting about {}. Type 'quit' or press Ctrl-D to leave.",
        session.profile().name
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        let (reply, source) = ask_tutor(backend.as_deref(), &mut session, message).await;
        match source {
            ReplySource::Backend => writeln!(stdout, "tutor: {reply}")?,
            ReplySource::Local => writeln!(stdout, "tutor (local): {reply}")?,
        }
        stdout.flush()?;
    }

    tracing::debug!("conversation ended after {} turns", session.conversation().len());
    Ok(())
}
