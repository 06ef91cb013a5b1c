use super::StorageBackend;
use crate::error::{PkeepError, Result};
use crate::fsio;
use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stores a collection as a pretty-printed JSON array in a single file, with
/// the id high-water mark in a `<file>.meta` sidecar next to it.
pub struct FsBackend {
    path: PathBuf,
    mark_path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct IdMark {
    last_id: u64,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut mark_name = path.file_name().map(OsString::from).unwrap_or_default();
        mark_name.push(".meta");
        let mark_path = path.with_file_name(mark_name);
        Self { path, mark_path }
    }

    pub fn mark_path(&self) -> &Path {
        &self.mark_path
    }
}

impl StorageBackend for FsBackend {
    fn load<R: Record>(&self) -> Result<Option<Vec<R>>> {
        let loaded = fsio::read_with(&self.path, |reader| {
            serde_json::from_reader(reader).map_err(|source| PkeepError::Parse {
                path: self.path.clone(),
                source,
            })
        });

        match loaded {
            Ok(records) => Ok(Some(records)),
            Err(PkeepError::FileMissing(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save<R: Record>(&self, records: &[R]) -> Result<()> {
        fsio::write_with(&self.path, |writer| {
            serde_json::to_writer_pretty(&mut *writer, records)
                .map_err(PkeepError::Serialization)?;
            writer.write_all(b"\n").map_err(PkeepError::Io)
        })
    }

    fn load_last_id(&self) -> Result<u64> {
        let loaded = fsio::read_with(&self.mark_path, |reader| {
            serde_json::from_reader::<_, IdMark>(reader).map_err(|source| PkeepError::Parse {
                path: self.mark_path.clone(),
                source,
            })
        });

        match loaded {
            Ok(mark) => Ok(mark.last_id),
            Err(PkeepError::FileMissing(_)) => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn save_last_id(&self, last_id: u64) -> Result<()> {
        fsio::write_with(&self.mark_path, |writer| {
            serde_json::to_writer(&mut *writer, &IdMark { last_id })
                .map_err(PkeepError::Serialization)?;
            writer.write_all(b"\n").map_err(PkeepError::Io)
        })
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
