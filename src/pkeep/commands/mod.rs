//! # Command Layer
//!
//! One module per operation. Every command takes a [`RecordStore`] and plain
//! arguments and returns a [`CmdResult`]; none of them print, prompt or exit.
//!
//! Commands are generic over the record kind, except `complete` which only
//! makes sense for tasks.
//!
//! Recoverable conditions (validation, unknown id, missing CSV file) come back
//! as `Err` and leave the store unchanged. "Nothing to show" conditions, like
//! listing an empty collection, are successes carrying an info message.
//!
//! [`RecordStore`]: crate::store::RecordStore

use std::path::PathBuf;

pub mod add;
pub mod complete;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod search;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug)]
pub struct CmdResult<R> {
    /// Records created, changed or removed by the command.
    pub affected: Vec<R>,
    /// Records the command wants shown.
    pub listed: Vec<R>,
    /// File written or read, for export and import.
    pub path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl<R> Default for CmdResult<R> {
    fn default() -> Self {
        Self {
            affected: Vec::new(),
            listed: Vec::new(),
            path: None,
            messages: Vec::new(),
        }
    }
}

impl<R> CmdResult<R> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, records: Vec<R>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, records: Vec<R>) -> Self {
        self.listed = records;
        self
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}
