use super::StorageBackend;
use crate::error::{PkeepError, Result};
use crate::model::Record;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Keeps the serialized JSON rather than typed records so that loading goes
/// through the same parse step as the file backend. Uses `RefCell` since
/// pkeep is single-threaded.
pub struct MemBackend {
    data: RefCell<Option<String>>,
    location: PathBuf,
    last_id: Cell<u64>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            data: RefCell::new(None),
            location: PathBuf::from("memory://records.json"),
            last_id: Cell::new(0),
            saves: Cell::new(0),
            simulate_write_error: Cell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `raw`, as if a file with that content existed.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.data.borrow_mut() = Some(raw.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn raw(&self) -> Option<String> {
        self.data.borrow().clone()
    }

    /// The stored id high-water mark.
    pub fn last_id(&self) -> u64 {
        self.last_id.get()
    }
}

impl StorageBackend for MemBackend {
    fn load<R: Record>(&self) -> Result<Option<Vec<R>>> {
        let data = self.data.borrow();
        let Some(raw) = data.as_deref() else {
            return Ok(None);
        };
        let records = serde_json::from_str(raw).map_err(|source| PkeepError::Parse {
            path: self.location.clone(),
            source,
        })?;
        Ok(Some(records))
    }

    fn save<R: Record>(&self, records: &[R]) -> Result<()> {
        if self.simulate_write_error.get() {
            let err = std::io::Error::other("simulated write error");
            return Err(PkeepError::Io(err));
        }
        let raw = serde_json::to_string_pretty(records)?;
        *self.data.borrow_mut() = Some(raw);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn load_last_id(&self) -> Result<u64> {
        Ok(self.last_id.get())
    }

    fn save_last_id(&self, last_id: u64) -> Result<()> {
        if self.simulate_write_error.get() {
            let err = std::io::Error::other("simulated write error");
            return Err(PkeepError::Io(err));
        }
        self.last_id.set(last_id);
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.location
    }
}
