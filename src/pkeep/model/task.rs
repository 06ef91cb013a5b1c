use super::{due_date_format, replace_if_given, CsvRow, Record, RecordKind, DUE_DATE_FORMAT};
use crate::error::{PkeepError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const STATUS_DONE: &str = "Done";
pub const STATUS_NOT_DONE: &str = "Not done";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(name)
    }
}

impl FromStr for Priority {
    type Err = PkeepError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Priority::all()
            .iter()
            .copied()
            .find(|p| p.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                PkeepError::validation(format!(
                    "invalid priority {:?}, expected one of Low, Medium, High",
                    s
                ))
            })
    }
}

pub fn parse_due_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT).map_err(|_| {
        PkeepError::validation(format!("invalid due date {:?}, expected DD-MM-YYYY", raw))
    })
}

fn parse_status(raw: &str) -> Result<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(STATUS_DONE) {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case(STATUS_NOT_DONE) {
        Ok(false)
    } else {
        Err(PkeepError::validation(format!(
            "invalid status {:?}, expected {:?} or {:?}",
            raw, STATUS_DONE, STATUS_NOT_DONE
        )))
    }
}

/// Blank input means "no value".
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn status(&self) -> &'static str {
        if self.done {
            STATUS_DONE
        } else {
            STATUS_NOT_DONE
        }
    }
}

/// Raw task fields. Priority and due date are validated when the task is built.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

impl Record for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const KIND: RecordKind = RecordKind::Task;
    const CSV_HEADER: &'static [&'static str] = &[
        "ID",
        "Title",
        "Description",
        "Status",
        "Priority",
        "Due Date",
    ];

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn build(id: u64, draft: TaskDraft, _now: NaiveDateTime) -> Result<Self> {
        let priority = non_blank(draft.priority.as_deref())
            .map(Priority::from_str)
            .transpose()?
            .unwrap_or_default();
        let due_date = non_blank(draft.due_date.as_deref())
            .map(parse_due_date)
            .transpose()?;

        Ok(Task {
            id,
            title: draft.title,
            description: draft.description,
            done: false,
            priority,
            due_date,
        })
    }

    fn apply(&mut self, patch: TaskPatch, _now: NaiveDateTime) -> Result<()> {
        let priority = non_blank(patch.priority.as_deref())
            .map(Priority::from_str)
            .transpose()?;
        let due_date = non_blank(patch.due_date.as_deref())
            .map(parse_due_date)
            .transpose()?;

        replace_if_given(&mut self.title, patch.title);
        replace_if_given(&mut self.description, patch.description);
        if let Some(done) = patch.done {
            self.done = done;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(due_date) = due_date {
            self.due_date = Some(due_date);
        }
        Ok(())
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.description.clone(),
            self.status().to_string(),
            self.priority.to_string(),
            self.due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        ]
    }

    fn from_csv_row(id: u64, row: &CsvRow<'_>, _now: NaiveDateTime) -> Result<Self> {
        let done = row.non_blank("Status").map(parse_status).transpose()?;
        let priority = row.non_blank("Priority").map(Priority::from_str).transpose()?;
        let due_date = row.non_blank("Due Date").map(parse_due_date).transpose()?;

        Ok(Task {
            id,
            title: row.text("Title"),
            description: row.text("Description"),
            done: done.unwrap_or(false),
            priority: priority.unwrap_or_default(),
            due_date,
        })
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}
