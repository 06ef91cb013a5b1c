use super::{parse_timestamp, replace_if_given, timestamp_format, CsvRow, Record, RecordKind};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Last modification time. Refreshed by every edit.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Record for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const KIND: RecordKind = RecordKind::Note;
    const CSV_HEADER: &'static [&'static str] = &["ID", "Title", "Content", "Date"];

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn build(id: u64, draft: NoteDraft, now: NaiveDateTime) -> Result<Self> {
        Ok(Note {
            id,
            title: draft.title,
            content: draft.content,
            timestamp: now,
        })
    }

    fn apply(&mut self, patch: NotePatch, now: NaiveDateTime) -> Result<()> {
        replace_if_given(&mut self.title, patch.title);
        replace_if_given(&mut self.content, patch.content);
        self.timestamp = now;
        Ok(())
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.content.clone(),
            self.timestamp.format(super::TIMESTAMP_FORMAT).to_string(),
        ]
    }

    fn from_csv_row(id: u64, row: &CsvRow<'_>, now: NaiveDateTime) -> Result<Self> {
        let timestamp = match row.non_blank("Date") {
            Some(raw) => parse_timestamp(raw)?,
            None => now,
        };
        Ok(Note {
            id,
            title: row.text("Title"),
            content: row.text("Content"),
            timestamp,
        })
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.title, &self.content]
    }
}
