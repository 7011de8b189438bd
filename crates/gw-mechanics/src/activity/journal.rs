//! In-memory activity log with text and markdown export.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::record::ActivityRecord;
use crate::ports::ActivityLog;
use crate::resolution::Classification;

/// A chronological log of posted records.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<ActivityRecord>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn append(&self, record: ActivityRecord) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// A copy of every record so far.
    pub fn entries(&self) -> Vec<ActivityRecord> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been posted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Activity Log\n\n");
        for entry in self.entries() {
            match &entry {
                ActivityRecord::Check {
                    actor,
                    action,
                    transcript,
                    target,
                    classification,
                    destiny_rerolls,
                    ..
                } => {
                    out.push_str(&format!(
                        "**{action}** ({actor}): {transcript} vs {target} => **{classification}**"
                    ));
                    if *classification == Classification::CriticalSuccess {
                        out.push_str(" CRITICAL!!");
                    }
                    if *destiny_rerolls > 0 {
                        out.push_str(&format!(" (destiny x{destiny_rerolls})"));
                    }
                    out.push_str("\n\n");
                }
                ActivityRecord::Damage {
                    actor,
                    action,
                    transcript,
                    ..
                } => {
                    out.push_str(&format!("**{action}** ({actor}): {transcript}\n\n"));
                }
                other => {
                    out.push_str(&format!("{other}\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as plain text, one record per line.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for entry in self.entries() {
            out.push_str(&format!(
                "[{}] {entry}\n",
                entry.timestamp().format("%H:%M:%S")
            ));
        }
        out
    }
}

#[async_trait]
impl ActivityLog for Journal {
    async fn post(&self, record: ActivityRecord) {
        self.append(record);
    }
}
