//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every UI (the CLI, the interactive menu, tests).
//!
//! [`PkeepApi`] owns one [`RecordStore`] per record kind. Stores are opened
//! lazily, the first time their kind is used, so a corrupt `tasks.json` only
//! takes tasks down: notes and contacts keep working.
//!
//! Each accessor returns a [`Collection`], a borrowed handle exposing the
//! operations shared by every kind. Task-only operations live in a separate
//! `impl` block on `Collection<'_, Task, B>`.
//!
//! The API does not print and does not decide how errors are shown. It
//! returns `Result<CmdResult<R>>` and leaves the rest to the caller.

use crate::commands;
use crate::config::{PkeepConfig, StoreConfig};
use crate::error::Result;
use crate::model::{Contact, Note, Record, RecordKind, Task};
use crate::store::fs_backend::FsBackend;
use crate::store::{RecordStore, StorageBackend};
use std::path::{Path, PathBuf};

/// Builds the backend for one store.
pub type BackendFactory<B> = fn(&StoreConfig) -> B;

pub struct PkeepApi<B: StorageBackend> {
    data_dir: PathBuf,
    open_backend: BackendFactory<B>,
    note_config: StoreConfig,
    task_config: StoreConfig,
    contact_config: StoreConfig,
    notes: Option<RecordStore<Note, B>>,
    tasks: Option<RecordStore<Task, B>>,
    contacts: Option<RecordStore<Contact, B>>,
}

impl PkeepApi<FsBackend> {
    /// File-backed API rooted at `data_dir`.
    pub fn open(data_dir: &Path, config: &PkeepConfig) -> Self {
        Self::with_backend(data_dir, config, |cfg| FsBackend::new(&cfg.backing_path))
    }
}

impl<B: StorageBackend> PkeepApi<B> {
    pub fn with_backend(
        data_dir: &Path,
        config: &PkeepConfig,
        open_backend: BackendFactory<B>,
    ) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            open_backend,
            note_config: config.store_config(data_dir, RecordKind::Note),
            task_config: config.store_config(data_dir, RecordKind::Task),
            contact_config: config.store_config(data_dir, RecordKind::Contact),
            notes: None,
            tasks: None,
            contacts: None,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_config(&self, kind: RecordKind) -> &StoreConfig {
        match kind {
            RecordKind::Note => &self.note_config,
            RecordKind::Task => &self.task_config,
            RecordKind::Contact => &self.contact_config,
        }
    }

    pub fn notes(&mut self) -> Result<Collection<'_, Note, B>> {
        open_slot(&mut self.notes, &self.note_config, self.open_backend)
    }

    pub fn tasks(&mut self) -> Result<Collection<'_, Task, B>> {
        open_slot(&mut self.tasks, &self.task_config, self.open_backend)
    }

    pub fn contacts(&mut self) -> Result<Collection<'_, Contact, B>> {
        open_slot(&mut self.contacts, &self.contact_config, self.open_backend)
    }
}

fn open_slot<'a, R: Record, B: StorageBackend>(
    slot: &'a mut Option<RecordStore<R, B>>,
    config: &'a StoreConfig,
    open_backend: BackendFactory<B>,
) -> Result<Collection<'a, R, B>> {
    let store = match slot.take() {
        Some(store) => store,
        None => RecordStore::open(open_backend(config))?,
    };
    Ok(Collection {
        store: slot.insert(store),
        csv_path: &config.csv_path,
    })
}

/// Operations on one kind's records.
pub struct Collection<'a, R: Record, B: StorageBackend> {
    store: &'a mut RecordStore<R, B>,
    csv_path: &'a Path,
}

impl<R: Record, B: StorageBackend> Collection<'_, R, B> {
    pub fn store(&self) -> &RecordStore<R, B> {
        &*self.store
    }

    pub fn default_csv_path(&self) -> &Path {
        self.csv_path
    }

    pub fn add(&mut self, draft: R::Draft) -> Result<CmdResult<R>> {
        commands::add::run(self.store, draft)
    }

    pub fn list(&self) -> Result<CmdResult<R>> {
        commands::list::run(self.store())
    }

    pub fn view(&self, id: u64) -> Result<CmdResult<R>> {
        commands::view::run(self.store(), id)
    }

    pub fn edit(&mut self, id: u64, patch: R::Patch) -> Result<CmdResult<R>> {
        commands::edit::run(self.store, id, patch)
    }

    pub fn delete(&mut self, id: u64) -> Result<CmdResult<R>> {
        commands::delete::run(self.store, id)
    }

    pub fn search(&self, term: &str) -> Result<CmdResult<R>> {
        commands::search::run(self.store(), term)
    }

    /// Exports to `path`, or to the configured CSV file when `None`.
    pub fn export(&self, path: Option<&Path>) -> Result<CmdResult<R>> {
        commands::export::run(self.store(), path.unwrap_or(self.csv_path))
    }

    pub fn import(&mut self, path: &Path) -> Result<CmdResult<R>> {
        commands::import::run(self.store, path)
    }
}

impl<B: StorageBackend> Collection<'_, Task, B> {
    pub fn list_filtered(&self, filter: TaskFilter) -> Result<CmdResult<Task>> {
        commands::list::tasks(self.store(), filter)
    }

    pub fn complete(&mut self, id: u64, done: bool) -> Result<CmdResult<Task>> {
        commands::complete::run(self.store, id, done)
    }
}

pub use crate::commands::list::TaskFilter;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PkeepError;
    use crate::model::{ContactDraft, NoteDraft, TaskDraft};
    use crate::store::mem_backend::MemBackend;
    use std::fs;
    use tempfile::TempDir;

    fn mem_api(dir: &Path) -> PkeepApi<MemBackend> {
        PkeepApi::with_backend(dir, &PkeepConfig::default(), |_| MemBackend::new())
    }

    #[test]
    fn stores_are_independent() {
        let dir = TempDir::new().unwrap();
        let mut api = mem_api(dir.path());

        api.notes().unwrap().add(NoteDraft::new("n", "")).unwrap();
        let draft = TaskDraft {
            title: "t".into(),
            ..Default::default()
        };
        api.tasks().unwrap().add(draft).unwrap();
        let draft = ContactDraft {
            name: "c".into(),
            ..Default::default()
        };
        let added = api.contacts().unwrap().add(draft).unwrap();

        assert_eq!(added.affected[0].id, 1);
        assert_eq!(api.notes().unwrap().store().len(), 1);
        assert_eq!(api.tasks().unwrap().store().len(), 1);
    }

    #[test]
    fn store_is_kept_between_calls() {
        let dir = TempDir::new().unwrap();
        let mut api = mem_api(dir.path());
        api.notes().unwrap().add(NoteDraft::new("a", "")).unwrap();
        api.notes().unwrap().add(NoteDraft::new("b", "")).unwrap();

        let listed = api.notes().unwrap().list().unwrap().listed;
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn export_defaults_to_configured_csv() {
        let dir = TempDir::new().unwrap();
        let mut api = mem_api(dir.path());
        let mut notes = api.notes().unwrap();
        notes.add(NoteDraft::new("a", "b")).unwrap();

        let result = notes.export(None).unwrap();
        assert_eq!(result.path, Some(dir.path().join("notes.csv")));
    }

    #[test]
    fn corrupt_store_does_not_affect_others() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tasks.json"), "{{{").unwrap();
        let mut api = PkeepApi::open(dir.path(), &PkeepConfig::default());

        assert!(matches!(api.tasks(), Err(PkeepError::Parse { .. })));
        api.notes()
            .unwrap()
            .add(NoteDraft::new("fine", ""))
            .unwrap();
        assert!(dir.path().join("notes.json").exists());
    }

    #[test]
    fn task_operations_are_reachable() {
        let dir = TempDir::new().unwrap();
        let mut api = mem_api(dir.path());
        let mut tasks = api.tasks().unwrap();
        let draft = TaskDraft {
            title: "t".into(),
            ..Default::default()
        };
        tasks.add(draft).unwrap();
        tasks.complete(1, true).unwrap();

        let pending = tasks
            .list_filtered(TaskFilter {
                pending_only: true,
                priority: None,
            })
            .unwrap();
        assert!(pending.listed.is_empty());
    }
}
