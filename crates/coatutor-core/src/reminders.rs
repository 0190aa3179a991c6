//! Study reminders persisted as one flat JSON object keyed by task id.
//!
//! Reads and writes always cover the whole object. A missing or corrupted
//! file reads as empty; the next save overwrites it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub task_id: String,
    pub note: String,
    pub due_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// All reminders, keyed by task id.
pub type Reminders = BTreeMap<String, Reminder>;

/// File-backed reminder store.
#[derive(Debug, Clone)]
pub struct ReminderStore {
    path: PathBuf,
}

impl ReminderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every reminder. Never fails: unreadable data is treated as empty.
    pub fn load(&self) -> Reminders {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Reminders::new(),
            Err(e) => {
                tracing::warn!("could not read reminders at {}: {e}", self.path.display());
                return Reminders::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(
                    "ignoring corrupted reminders at {}: {e}",
                    self.path.display()
                );
                Reminders::new()
            }
        }
    }

    /// Replace the stored object with `reminders`.
    pub fn save(&self, reminders: &Reminders) -> Result<()> {
        let json =
            serde_json::to_string_pretty(reminders).context("failed to serialize reminders")?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create reminder directory {}", parent.display())
                })?;
            }
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write reminders to {}", self.path.display()))
    }

    /// Create or replace the reminder for `task_id`.
    pub fn set(&self, task_id: &str, note: &str, due_at: DateTime<Utc>) -> Result<Reminder> {
        let mut all = self.load();
        let reminder = Reminder {
            task_id: task_id.to_string(),
            note: note.to_string(),
            due_at,
            created_at: Utc::now(),
        };
        all.insert(task_id.to_string(), reminder.clone());
        self.save(&all)?;
        Ok(reminder)
    }

    /// Remove the reminder for `task_id`, returning it if it existed.
    pub fn remove(&self, task_id: &str) -> Result<Option<Reminder>> {
        let mut all = self.load();
        let removed = all.remove(task_id);
        if removed.is_some() {
            self.save(&all)?;
        }
        Ok(removed)
    }

    /// Reminders ordered by due time.
    pub fn list(&self) -> Vec<Reminder> {
        let mut all: Vec<Reminder> = self.load().into_values().collect();
        all.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.task_id.cmp(&b.task_id)));
        all
    }

    /// Reminders due at or before `now`.
    pub fn due(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        self.list().into_iter().filter(|r| r.due_at <= now).collect()
    }
}
