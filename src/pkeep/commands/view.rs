use crate::commands::CmdResult;
use crate::error::{PkeepError, Result};
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};

pub fn run<R: Record, B: StorageBackend>(
    store: &RecordStore<R, B>,
    id: u64,
) -> Result<CmdResult<R>> {
    let record = store
        .get(id)
        .cloned()
        .ok_or(PkeepError::NotFound { kind: R::KIND, id })?;
    Ok(CmdResult::default().with_listed(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::{Note, NoteDraft};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn returns_the_record() {
        let mut store: RecordStore<Note, _> = RecordStore::open(MemBackend::new()).unwrap();
        add::run(&mut store, NoteDraft::new("Hello", "World")).unwrap();

        let result = run(&store, 1).unwrap();
        assert_eq!(result.listed[0].content, "World");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store: RecordStore<Note, _> = RecordStore::open(MemBackend::new()).unwrap();
        assert!(matches!(
            run(&store, 3),
            Err(PkeepError::NotFound { id: 3, .. })
        ));
    }
}
