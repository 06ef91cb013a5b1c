use super::StorageBackend;
use crate::error::{PkeepError, Result};
use crate::model::{local_now, Record, RecordKind};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::iter::FusedIterator;

/// One record kind's collection, kept in memory and mirrored to a backend.
///
/// Identifiers are allocated from a high-water mark. On open it is the larger
/// of the backend's stored mark and the largest id on file, and every add
/// writes the new mark back before the records. Deleting the newest record
/// never lowers it, so an id is not handed out twice, across restarts too.
pub struct RecordStore<R: Record, B: StorageBackend> {
    backend: B,
    records: Vec<R>,
    last_id: u64,
    clock: fn() -> NaiveDateTime,
}

impl<R: Record, B: StorageBackend> RecordStore<R, B> {
    /// Loads the collection from `backend`, creating an empty one if the
    /// backend has nothing stored yet.
    ///
    /// # Errors
    /// Returns [`PkeepError::Parse`] if the stored data cannot be read as a
    /// collection of `R`. The store is unusable in that case.
    pub fn open(backend: B) -> Result<Self> {
        let records = match backend.load::<R>()? {
            Some(records) => records,
            None => {
                backend.save::<R>(&[])?;
                info!(
                    "event=store_created kind={} path={}",
                    R::KIND,
                    backend.location().display()
                );
                Vec::new()
            }
        };
        let max_id = records.iter().map(|r| r.id()).max().unwrap_or(0);
        let last_id = backend.load_last_id()?.max(max_id);
        debug!(
            "event=store_open kind={} records={} last_id={}",
            R::KIND,
            records.len(),
            last_id
        );

        Ok(Self {
            backend,
            records,
            last_id,
            clock: local_now,
        })
    }

    /// Replace the clock used for timestamps.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn kind(&self) -> RecordKind {
        R::KIND
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// All records in insertion order, or `None` when the collection is empty.
    pub fn list(&self) -> Option<Records<'_, R>> {
        if self.records.is_empty() {
            None
        } else {
            Some(Records {
                inner: self.records.iter(),
            })
        }
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// The id the next added record will get.
    pub fn next_id(&self) -> u64 {
        self.last_id + 1
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub fn add(&mut self, draft: R::Draft) -> Result<R> {
        let id = self.next_id();
        let record = R::build(id, draft, self.now())?;

        self.records.push(record.clone());
        if let Err(e) = self.persist(Some(id)) {
            self.records.pop();
            return Err(e);
        }
        self.last_id = id;
        info!("event=record_add kind={} id={} status=ok", R::KIND, id);
        Ok(record)
    }

    pub fn edit(&mut self, id: u64, patch: R::Patch) -> Result<R> {
        let pos = self.position(id)?;
        let mut updated = self.records[pos].clone();
        updated.apply(patch, self.now())?;

        let previous = std::mem::replace(&mut self.records[pos], updated.clone());
        if let Err(e) = self.persist(None) {
            self.records[pos] = previous;
            return Err(e);
        }
        info!("event=record_edit kind={} id={} status=ok", R::KIND, id);
        Ok(updated)
    }

    pub fn delete(&mut self, id: u64) -> Result<R> {
        let pos = self.position(id)?;
        let removed = self.records.remove(pos);
        if let Err(e) = self.persist(None) {
            self.records.insert(pos, removed);
            return Err(e);
        }
        info!("event=record_delete kind={} id={} status=ok", R::KIND, id);
        Ok(removed)
    }

    /// Appends records built elsewhere (CSV import) and persists once.
    ///
    /// Ids must continue from [`RecordStore::next_id`] in order; anything else
    /// is rejected before the collection is touched.
    pub fn extend(&mut self, incoming: Vec<R>) -> Result<usize> {
        let mut expected = self.next_id();
        for record in &incoming {
            if record.id() != expected {
                return Err(PkeepError::validation(format!(
                    "{} id {} out of sequence, expected {}",
                    R::KIND,
                    record.id(),
                    expected
                )));
            }
            expected += 1;
        }
        if incoming.is_empty() {
            return Ok(0);
        }

        let count = incoming.len();
        let last_id = expected - 1;
        let previous_len = self.records.len();
        self.records.extend(incoming);
        if let Err(e) = self.persist(Some(last_id)) {
            self.records.truncate(previous_len);
            return Err(e);
        }
        self.last_id = last_id;
        info!(
            "event=record_extend kind={} count={} status=ok",
            R::KIND,
            count
        );
        Ok(count)
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(PkeepError::NotFound { kind: R::KIND, id })
    }

    /// Saves the records, preceded by the id mark when it moved. The mark is
    /// written first so it never falls behind the records on disk.
    fn persist(&self, last_id: Option<u64>) -> Result<()> {
        let result = match last_id {
            Some(id) => self
                .backend
                .save_last_id(id)
                .and_then(|_| self.backend.save(&self.records)),
            None => self.backend.save(&self.records),
        };
        result.map_err(|e| {
            warn!(
                "event=store_save kind={} path={} status=error error={}",
                R::KIND,
                self.backend.location().display(),
                e
            );
            e
        })
    }
}

/// Lazy, restartable view over a store's records.
///
/// Clone it to iterate again from the start.
#[derive(Clone)]
pub struct Records<'a, R> {
    inner: std::slice::Iter<'a, R>,
}

impl<'a, R> Iterator for Records<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<R> ExactSizeIterator for Records<'_, R> {}
impl<R> FusedIterator for Records<'_, R> {}
