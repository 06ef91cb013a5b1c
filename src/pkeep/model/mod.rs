//! # Records
//!
//! Every kind of record pkeep stores (notes, tasks, contacts) is a flat struct
//! implementing [`Record`]. The trait is the schema the generic machinery works
//! from: the store uses it to build, validate and patch records, CSV interchange
//! uses it to map rows to fields, and search uses it to find the text to match.
//!
//! Adding a new kind means writing one struct and one `impl Record`; nothing in
//! `store/`, `interchange.rs` or `commands/` needs to change.
//!
//! ## Identity
//!
//! Records carry a `u64` id assigned by the store. Ids are never taken from
//! user input or CSV files.
//!
//! ## Partial updates
//!
//! Edits are expressed as patches of `Option` fields. A field that is `None`,
//! or `Some` of a blank string, keeps its current value. This is the same rule
//! for every kind.

use crate::error::Result;
use chrono::{NaiveDateTime, Timelike};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub mod contact;
pub mod note;
pub mod task;

pub use contact::{Contact, ContactDraft, ContactPatch};
pub use note::{Note, NoteDraft, NotePatch};
pub use task::{Priority, Task, TaskDraft, TaskPatch};

/// Display format for note timestamps, both on disk and in CSV.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Day-month-year format for task due dates.
pub const DUE_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Note,
    Task,
    Contact,
}

impl RecordKind {
    pub fn all() -> &'static [RecordKind] {
        &[RecordKind::Note, RecordKind::Task, RecordKind::Contact]
    }

    /// Plural, lowercase name. Also the default file stem.
    pub fn plural(&self) -> &'static str {
        match self {
            RecordKind::Note => "notes",
            RecordKind::Task => "tasks",
            RecordKind::Contact => "contacts",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Note => "Note",
            RecordKind::Task => "Task",
            RecordKind::Contact => "Contact",
        };
        f.write_str(name)
    }
}

/// Schema of a record kind.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Field values for a new record, as collected from the user.
    type Draft;
    /// Field values for an edit. `None` or blank means "keep".
    type Patch;

    const KIND: RecordKind;

    /// Column names, in order, used for both export and import.
    const CSV_HEADER: &'static [&'static str];

    fn id(&self) -> u64;

    /// Short human label (title or name) used in messages.
    fn label(&self) -> &str;

    /// Validates the draft and builds a record with the given id.
    fn build(id: u64, draft: Self::Draft, now: NaiveDateTime) -> Result<Self>;

    /// Applies a patch. Must validate everything before touching `self`, so a
    /// rejected patch leaves the record as it was.
    fn apply(&mut self, patch: Self::Patch, now: NaiveDateTime) -> Result<()>;

    /// One value per `CSV_HEADER` column.
    fn to_csv_row(&self) -> Vec<String>;

    /// Builds a record from an imported row. Any id column in the row is
    /// ignored in favour of `id`.
    fn from_csv_row(id: u64, row: &CsvRow<'_>, now: NaiveDateTime) -> Result<Self>;

    /// Text fields searched by [`Record::matches`].
    fn search_text(&self) -> Vec<&str>;

    /// Case-insensitive substring match over [`Record::search_text`].
    fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.search_text()
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// A CSV data row addressed by header name.
pub struct CsvRow<'a> {
    headers: &'a csv::StringRecord,
    values: &'a csv::StringRecord,
}

impl<'a> CsvRow<'a> {
    pub fn new(headers: &'a csv::StringRecord, values: &'a csv::StringRecord) -> Self {
        Self { headers, values }
    }

    /// Raw cell of `column`, or `None` if the row has no such column.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let position = self
            .headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == column)?;
        self.values.get(position)
    }

    /// Like [`CsvRow::get`], but a blank cell counts as missing. Use it for
    /// columns that fall back to a default.
    pub fn non_blank(&self, column: &str) -> Option<&'a str> {
        self.get(column).filter(|value| !value.trim().is_empty())
    }

    /// Raw cell of `column`, or an empty string.
    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }
}

/// Replaces `slot` with `value` unless the value is missing or blank.
pub(crate) fn replace_if_given(slot: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *slot = value;
    }
}

/// Current local time at second precision.
pub fn local_now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        crate::error::PkeepError::validation(format!(
            "invalid date {:?}, expected YYYY-MM-DD HH:MM:SS",
            raw
        ))
    })
}

/// Serde adapter storing timestamps as `YYYY-MM-DD HH:MM:SS`.
pub(crate) mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter storing optional due dates as `DD-MM-YYYY` or `null`.
pub(crate) mod due_date_format {
    use super::DUE_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DUE_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| NaiveDate::parse_from_str(&s, DUE_DATE_FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
