//! coatutor CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "coatutor",
    version,
    about = "Computer organization & architecture study companion"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known topics
    Topics,

    /// Score a free-text practice answer against a topic checklist
    Evaluate {
        /// Topic name (e.g. "Instruction Cycle")
        #[arg(long)]
        topic: String,

        /// The answer to evaluate
        #[arg(long)]
        text: String,
    },

    /// Check the order of process steps for a sequence topic
    Sequence {
        /// Topic name
        #[arg(long)]
        topic: String,

        /// Comma-separated steps in the order you think they happen
        #[arg(long)]
        steps: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Talk to the Socratic tutor (reads lines from stdin)
    Chat {
        /// Topic name
        #[arg(long)]
        topic: String,

        /// Seed for reproducible question choice
        #[arg(long)]
        seed: Option<u64>,

        /// Ask the configured backend first, answering locally if it fails
        #[arg(long)]
        remote: bool,
    },

    /// Take a topic quiz
    Quiz {
        /// Topic name
        #[arg(long)]
        topic: String,

        /// Comma-separated zero-based answers; prompts on stdin when omitted
        #[arg(long)]
        answers: Option<String>,

        /// Skip submitting the result to the backend for a level prediction
        #[arg(long)]
        offline: bool,
    },

    /// Manage study reminders
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },

    /// Validate topic TOML files
    Validate {
        /// Path to a topic file or directory; defaults to the configured knowledge_paths
        #[arg(long)]
        knowledge: Option<PathBuf>,
    },

    /// Create starter config (at --config, or ./coatutor.toml) and example topic file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coatutor=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Topics => commands::topics::execute(config),
        Commands::Evaluate { topic, text } => commands::evaluate::execute(topic, text, config),
        Commands::Sequence { topic, steps, json } => {
            commands::sequence::execute(topic, steps, json, config)
        }
        Commands::Chat {
            topic,
            seed,
            remote,
        } => commands::chat::execute(topic, seed, remote, config).await,
        Commands::Quiz {
            topic,
            answers,
            offline,
        } => commands::quiz::execute(topic, answers, offline, config).await,
        Commands::Remind { action } => commands::remind::execute(action, config),
        Commands::Validate { knowledge } => commands::validate::execute(knowledge, config),
        Commands::Init => commands::init::execute(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
