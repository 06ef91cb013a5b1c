//! # Configuration
//!
//! Every store is built from an explicit [`StoreConfig`]; nothing in the core
//! reads a global path.
//!
//! ## Data directory
//!
//! Resolved in priority order:
//! 1. `--data-dir <DIR>` on the command line.
//! 2. `PKEEP_HOME` environment variable.
//! 3. The OS data directory (via `directories`), e.g. `~/.local/share/pkeep`.
//!
//! ## `config.json`
//!
//! Optional, lives in the data directory. All keys default:
//!
//! | Key | Default |
//! |-----|---------|
//! | `notes_file` | `notes.json` |
//! | `tasks_file` | `tasks.json` |
//! | `contacts_file` | `contacts.json` |
//! | `notes_csv` | `notes.csv` |
//! | `tasks_csv` | `tasks.csv` |
//! | `contacts_csv` | `contacts.csv` |
//!
//! Relative names resolve against the data directory.

use crate::error::{PkeepError, Result};
use crate::fsio;
use crate::model::RecordKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "PKEEP_HOME";

/// Paths one store works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub kind: RecordKind,
    /// JSON file the store loads on open and overwrites on every change.
    pub backing_path: PathBuf,
    /// Default CSV file for export.
    pub csv_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PkeepConfig {
    #[serde(default = "default_notes_file")]
    pub notes_file: String,
    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,
    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,
    #[serde(default = "default_notes_csv")]
    pub notes_csv: String,
    #[serde(default = "default_tasks_csv")]
    pub tasks_csv: String,
    #[serde(default = "default_contacts_csv")]
    pub contacts_csv: String,
}

fn default_notes_file() -> String {
    "notes.json".to_string()
}

fn default_tasks_file() -> String {
    "tasks.json".to_string()
}

fn default_contacts_file() -> String {
    "contacts.json".to_string()
}

fn default_notes_csv() -> String {
    "notes.csv".to_string()
}

fn default_tasks_csv() -> String {
    "tasks.csv".to_string()
}

fn default_contacts_csv() -> String {
    "contacts.csv".to_string()
}

impl Default for PkeepConfig {
    fn default() -> Self {
        Self {
            notes_file: default_notes_file(),
            tasks_file: default_tasks_file(),
            contacts_file: default_contacts_file(),
            notes_csv: default_notes_csv(),
            tasks_csv: default_tasks_csv(),
            contacts_csv: default_contacts_csv(),
        }
    }
}

impl PkeepConfig {
    /// Where `config.json` lives for `data_dir`.
    pub fn path<P: AsRef<Path>>(data_dir: P) -> PathBuf {
        data_dir.as_ref().join(CONFIG_FILENAME)
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let config_path = Self::path(data_dir);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PkeepError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| PkeepError::Config(format!("{}: {}", config_path.display(), e)))
    }

    /// Save config to the given directory. Returns the file written.
    pub fn save<P: AsRef<Path>>(&self, data_dir: P) -> Result<PathBuf> {
        let config_path = Self::path(data_dir);
        fsio::write_with(&config_path, |writer| {
            serde_json::to_writer_pretty(&mut *writer, self)
                .map_err(PkeepError::Serialization)?;
            writer.write_all(b"\n").map_err(PkeepError::Io)
        })?;
        Ok(config_path)
    }

    pub fn store_config(&self, data_dir: &Path, kind: RecordKind) -> StoreConfig {
        let (backing, csv) = match kind {
            RecordKind::Note => (&self.notes_file, &self.notes_csv),
            RecordKind::Task => (&self.tasks_file, &self.tasks_csv),
            RecordKind::Contact => (&self.contacts_file, &self.contacts_csv),
        };
        StoreConfig {
            kind,
            backing_path: data_dir.join(backing),
            csv_path: data_dir.join(csv),
        }
    }
}

/// Picks the data directory: explicit flag, then `PKEEP_HOME`, then the OS default.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "pkeep", "pkeep")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PkeepError::Config("could not determine a data directory".into()))
}
