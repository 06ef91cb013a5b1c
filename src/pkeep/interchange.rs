//! # CSV Interchange
//!
//! Export and import of a record collection as comma-separated text, separate
//! from the JSON backing file.
//!
//! Columns are mapped by header name, using [`Record::CSV_HEADER`] for both
//! directions, so files with reordered or missing columns still import.
//! Imported rows never keep their `ID` column: each row gets the next id the
//! store would hand out, which means an export/import round trip preserves
//! content but not identifiers.
//!
//! Import is all-or-nothing. Every row is built and validated before any of
//! them is appended, and the store persists once at the end.

use crate::error::{PkeepError, Result};
use crate::fsio;
use crate::model::{CsvRow, Record};
use crate::store::{RecordStore, StorageBackend};
use chrono::NaiveDateTime;
use log::info;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to export; no file was written.
    Empty,
    Written {
        path: PathBuf,
        count: usize,
    },
}

pub fn export<R: Record>(records: &[R], path: &Path) -> Result<ExportOutcome> {
    if records.is_empty() {
        return Ok(ExportOutcome::Empty);
    }

    fsio::write_with(path, |writer| write_csv(writer, records))?;
    info!(
        "event=csv_export kind={} count={} path={}",
        R::KIND,
        records.len(),
        path.display()
    );
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        count: records.len(),
    })
}

/// Imports every row of `path` into `store`. Returns the number of records added.
pub fn import<R: Record, B: StorageBackend>(
    store: &mut RecordStore<R, B>,
    path: &Path,
) -> Result<usize> {
    let first_id = store.next_id();
    let now = store.now();
    let records: Vec<R> = fsio::read_with(path, |reader| read_csv(reader, first_id, now))?;

    let count = store.extend(records)?;
    info!(
        "event=csv_import kind={} count={} path={}",
        R::KIND,
        count,
        path.display()
    );
    Ok(count)
}

pub fn write_csv<R: Record, W: Write>(writer: W, records: &[R]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(R::CSV_HEADER)?;
    for record in records {
        wtr.write_record(record.to_csv_row())?;
    }
    wtr.flush().map_err(PkeepError::Io)?;
    Ok(())
}

/// Parses CSV rows into records numbered from `first_id`.
pub fn read_csv<R: Record, Rd: Read>(
    reader: Rd,
    first_id: u64,
    now: NaiveDateTime,
) -> Result<Vec<R>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for (offset, row) in rdr.records().enumerate() {
        let row = row?;
        let id = first_id + offset as u64;
        let record = R::from_csv_row(id, &CsvRow::new(&headers, &row), now).map_err(|e| {
            match e {
                // Header is line 1, so the first data row is line 2.
                PkeepError::Validation(msg) => {
                    PkeepError::Validation(format!("line {}: {}", offset + 2, msg))
                }
                other => other,
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Contact, ContactDraft, Note, NoteDraft, Priority, Task, TaskDraft, TaskPatch,
    };
    use crate::store::fs_backend::FsBackend;
    use crate::store::mem_backend::MemBackend;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn task_store() -> RecordStore<Task, MemBackend> {
        RecordStore::open(MemBackend::new()).unwrap()
    }

    #[test]
    fn test_export_empty_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let outcome = export::<Note>(&[], &path).unwrap();

        assert_eq!(outcome, ExportOutcome::Empty);
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_header_and_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.csv");
        let mut store: RecordStore<Contact, _> = RecordStore::open(MemBackend::new()).unwrap();
        for name in ["Ada", "Grace"] {
            store
                .add(ContactDraft {
                    name: name.into(),
                    phone: "555".into(),
                    email: "x@y.z".into(),
                })
                .unwrap();
        }

        let outcome = export(store.records(), &path).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: path.clone(),
                count: 2
            }
        );

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "ID,Name,Phone,Email");
        assert_eq!(lines[1], "1,Ada,555,x@y.z");
        assert_eq!(lines[2], "2,Grace,555,x@y.z");
    }

    #[test]
    fn test_import_missing_file() {
        let mut store = task_store();
        let err = import(&mut store, Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, PkeepError::FileMissing(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_ignores_source_ids_and_continues_numbering() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(
            &path,
            "ID,Title,Description,Status,Priority,Due Date\n\
             1,Imported A,,Done,Low,\n\
             1,Imported B,desc,Not done,,15-08-2024\n",
        )
        .unwrap();

        let mut store = task_store();
        store
            .add(TaskDraft {
                title: "Existing".into(),
                ..Default::default()
            })
            .unwrap();

        let count = import(&mut store, &path).unwrap();

        assert_eq!(count, 2);
        let ids: Vec<_> = store.records().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let b = store.get(3).unwrap();
        assert_eq!(b.title, "Imported B");
        assert!(!b.done);
        assert_eq!(b.priority, Priority::Medium);
        assert_eq!(b.due_date, NaiveDate::from_ymd_opt(2024, 8, 15));
        assert!(store.get(2).unwrap().done);
    }

    #[test]
    fn test_import_missing_columns_use_defaults() {
        let csv = "Title\nOnly a title\n";
        let tasks: Vec<Task> = read_csv(csv.as_bytes(), 1, noon()).unwrap();

        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].done);
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert_eq!(tasks[0].due_date, None);
    }

    #[test]
    fn test_import_bad_row_aborts_whole_import() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(&path, "Title,Priority\nGood,High\nBad,Urgent\n").unwrap();

        let mut store = task_store();
        let saves = store.backend().save_count();
        let err = import(&mut store, &path).unwrap_err();

        match err {
            PkeepError::Validation(msg) => assert!(msg.starts_with("line 3:"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
        assert_eq!(store.backend().save_count(), saves);
    }

    #[test]
    fn test_import_persists_once() {
        let csv_dir = TempDir::new().unwrap();
        let path = csv_dir.path().join("notes.csv");
        fs::write(&path, "Title,Content\nA,1\nB,2\nC,3\n").unwrap();

        let mut store: RecordStore<Note, _> = RecordStore::open(MemBackend::new()).unwrap();
        let before = store.backend().save_count();
        import(&mut store, &path).unwrap();

        assert_eq!(store.backend().save_count(), before + 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_round_trip_preserves_content_and_renumbers() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("notes.csv");

        let mut source: RecordStore<Note, _> =
            RecordStore::open(FsBackend::new(dir.path().join("a.json"))).unwrap();
        source.add(NoteDraft::new("First", "with, comma")).unwrap();
        source.add(NoteDraft::new("Second", "multi\nline")).unwrap();
        source.add(NoteDraft::new("Third", "\"quoted\"")).unwrap();
        source.delete(1).unwrap();

        export(source.records(), &csv_path).unwrap();

        let mut target: RecordStore<Note, _> =
            RecordStore::open(FsBackend::new(dir.path().join("b.json"))).unwrap();
        import(&mut target, &csv_path).unwrap();

        assert_eq!(target.len(), 2);
        let pairs = source.records().iter().zip(target.records());
        for (offset, (orig, copy)) in pairs.enumerate() {
            assert_eq!(copy.id, offset as u64 + 1);
            assert_eq!(copy.title, orig.title);
            assert_eq!(copy.content, orig.content);
            assert_eq!(copy.timestamp, orig.timestamp);
        }
    }

    #[test]
    fn test_task_round_trip_keeps_status_priority_and_due_date() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("tasks.csv");

        let mut source = task_store();
        source
            .add(TaskDraft {
                title: "Water plants".into(),
                description: String::new(),
                priority: Some("low".into()),
                due_date: None,
            })
            .unwrap();
        source
            .add(TaskDraft {
                title: "Ship report".into(),
                description: "Q3, \"final\" numbers".into(),
                priority: Some("High".into()),
                due_date: Some("31-12-2024".into()),
            })
            .unwrap();
        let finish = TaskPatch {
            done: Some(true),
            ..Default::default()
        };
        source.edit(1, finish).unwrap();

        export(source.records(), &csv_path).unwrap();
        let mut target = task_store();
        assert_eq!(import(&mut target, &csv_path).unwrap(), 2);

        for (orig, copy) in source.records().iter().zip(target.records()) {
            assert_eq!(copy.title, orig.title);
            assert_eq!(copy.description, orig.description);
            assert_eq!(copy.done, orig.done);
            assert_eq!(copy.priority, orig.priority);
            assert_eq!(copy.due_date, orig.due_date);
        }

        let done = target.get(1).unwrap();
        assert!(done.done);
        assert_eq!(done.priority, Priority::Low);
        assert_eq!(done.due_date, None);

        let pending = target.get(2).unwrap();
        assert!(!pending.done);
        assert_eq!(pending.priority, Priority::High);
        assert_eq!(pending.due_date, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(pending.description, "Q3, \"final\" numbers");
    }

    #[test]
    fn test_round_trip_keeps_whitespace_only_fields() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("notes.csv");

        let mut source: RecordStore<Note, _> = RecordStore::open(MemBackend::new()).unwrap();
        source.add(NoteDraft::new("Spaces", "   ")).unwrap();
        export(source.records(), &csv_path).unwrap();

        let mut target: RecordStore<Note, _> = RecordStore::open(MemBackend::new()).unwrap();
        import(&mut target, &csv_path).unwrap();

        assert_eq!(target.get(1).unwrap().content, "   ");
    }
}
