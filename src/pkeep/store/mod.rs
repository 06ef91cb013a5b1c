//! # Storage Layer
//!
//! Storage is split in two:
//!
//! - [`StorageBackend`]: the "how". Reads and writes a whole collection of
//!   records to some medium. [`fs_backend::FsBackend`] writes a JSON file,
//!   [`mem_backend::MemBackend`] keeps the JSON in memory for tests.
//! - [`RecordStore`]: the "what". Holds one record kind's collection in memory,
//!   allocates identifiers and writes the whole collection back through the
//!   backend after every mutation.
//!
//! One store exists per record kind. A store is the only owner of its
//! collection and of its backing file.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── notes.json         # JSON array of notes
//! ├── notes.json.meta    # {"last_id": N}, highest note id ever handed out
//! ├── tasks.json
//! ├── tasks.json.meta
//! ├── contacts.json
//! ├── contacts.json.meta
//! └── config.json        # optional, file name overrides
//! ```
//!
//! There is no append log and no diffing: loading parses the full file once
//! when the store is opened, saving serializes the full collection.
//!
//! The `.meta` sidecar keeps identifiers from coming back after the newest
//! record is deleted and the program restarts. The record file itself stays a
//! plain array.

use crate::error::Result;
use crate::model::Record;
use std::path::Path;

pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use record_store::{RecordStore, Records};

/// Raw persistence of one collection.
pub trait StorageBackend {
    /// Load the full collection.
    /// Returns `Ok(None)` if nothing has been stored yet.
    /// Returns [`crate::error::PkeepError::Parse`] if the stored data is not a
    /// valid collection of `R`.
    fn load<R: Record>(&self) -> Result<Option<Vec<R>>>;

    /// Replace the stored collection with `records`.
    fn save<R: Record>(&self, records: &[R]) -> Result<()>;

    /// Highest id ever handed out for this collection, or 0 if none was
    /// recorded.
    fn load_last_id(&self) -> Result<u64>;

    /// Record the highest id handed out so far.
    fn save_last_id(&self, last_id: u64) -> Result<()>;

    /// Where the collection lives. A real path for `FsBackend`, a virtual
    /// one for `MemBackend`.
    fn location(&self) -> &Path;
}
