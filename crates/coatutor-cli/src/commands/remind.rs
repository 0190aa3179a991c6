//! The `coatutor remind` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use clap::Subcommand;

use coatutor_backend::config::load_config_from;
use coatutor_core::reminders::{Reminder, ReminderStore};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Create or replace a reminder
    Set {
        /// Task identifier
        #[arg(long)]
        task: String,

        /// What to study
        #[arg(long)]
        note: String,

        /// Due time as RFC 3339 (e.g. 2026-11-02T09:00:00Z)
        #[arg(long, conflicts_with = "in_minutes")]
        at: Option<String>,

        /// Due this many minutes from now
        #[arg(long)]
        in_minutes: Option<i64>,
    },

    /// List all reminders by due time
    List,

    /// Delete a reminder
    Remove {
        /// Task identifier
        #[arg(long)]
        task: String,
    },

    /// Show reminders that are due now
    Due,
}

pub fn execute(action: RemindAction, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = ReminderStore::new(&config.reminders_path);

    match action {
        RemindAction::Set {
            task,
            note,
            at,
            in_minutes,
        } => {
            let due_at = resolve_due(at.as_deref(), in_minutes, Utc::now())?;
            let reminder = store.set(&task, &note, due_at)?;
            println!("Reminder set: {} due {}", reminder.task_id, format_due(&reminder));
        }
        RemindAction::List => print_reminders(&store.list(), "No reminders."),
        RemindAction::Remove { task } => match store.remove(&task)? {
            Some(r) => println!("Removed reminder {}", r.task_id),
            None => println!("No reminder for {task}."),
        },
        RemindAction::Due => print_reminders(&store.due(Utc::now()), "Nothing due."),
    }

    Ok(())
}

fn resolve_due(at: Option<&str>, in_minutes: Option<i64>, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match (at, in_minutes) {
        (Some(at), _) => Ok(DateTime::parse_from_rfc3339(at)
            .with_context(|| format!("invalid due time '{at}'"))?
            .with_timezone(&Utc)),
        (None, Some(minutes)) => TimeDelta::try_minutes(minutes)
            .and_then(|delta| now.checked_add_signed(delta))
            .with_context(|| format!("due time out of range: {minutes} minutes from now")),
        (None, None) => Ok(now),
    }
}

fn format_due(reminder: &Reminder) -> String {
    reminder.due_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn print_reminders(reminders: &[Reminder], empty: &str) {
    if reminders.is_empty() {
        println!("{empty}");
        return;
    }
    for r in reminders {
        println!("{}  {}  {}", format_due(r), r.task_id, r.note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_time_resolution() {
        let now = Utc::now();
        assert_eq!(resolve_due(None, None, now).unwrap(), now);
        assert_eq!(
            resolve_due(None, Some(30), now).unwrap(),
            now + TimeDelta::minutes(30)
        );
        assert_eq!(
            resolve_due(None, Some(-15), now).unwrap(),
            now - TimeDelta::minutes(15)
        );
        let parsed = resolve_due(Some("2026-11-02T09:00:00+02:00"), None, now).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-11-02T07:00:00+00:00");
        assert!(resolve_due(Some("next tuesday"), None, now).is_err());
    }

    #[test]
    fn huge_offsets_are_errors_not_panics() {
        let now = Utc::now();
        for minutes in [i64::MAX / 1000, i64::MAX, i64::MIN, 9_223_372_036_854_775] {
            let err = resolve_due(None, Some(minutes), now).unwrap_err();
            assert!(err.to_string().contains("due time out of range"));
        }
    }
}
