use super::{replace_if_given, CsvRow, Record, RecordKind};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Record for Contact {
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    const KIND: RecordKind = RecordKind::Contact;
    const CSV_HEADER: &'static [&'static str] = &["ID", "Name", "Phone", "Email"];

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn build(id: u64, draft: ContactDraft, _now: NaiveDateTime) -> Result<Self> {
        Ok(Contact {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
        })
    }

    fn apply(&mut self, patch: ContactPatch, _now: NaiveDateTime) -> Result<()> {
        replace_if_given(&mut self.name, patch.name);
        replace_if_given(&mut self.phone, patch.phone);
        replace_if_given(&mut self.email, patch.email);
        Ok(())
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]
    }

    fn from_csv_row(id: u64, row: &CsvRow<'_>, _now: NaiveDateTime) -> Result<Self> {
        Ok(Contact {
            id,
            name: row.text("Name"),
            phone: row.text("Phone"),
            email: row.text("Email"),
        })
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.phone, &self.email]
    }
}
