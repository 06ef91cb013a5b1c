use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};

pub fn run<R: Record, B: StorageBackend>(
    store: &mut RecordStore<R, B>,
    draft: R::Draft,
) -> Result<CmdResult<R>> {
    let record = store.add(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} added ({}): {}",
        R::KIND,
        record.id(),
        record.label()
    )));
    Ok(result.with_affected(vec![record]))
}
