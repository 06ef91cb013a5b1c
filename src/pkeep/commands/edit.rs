use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};

pub fn run<R: Record, B: StorageBackend>(
    store: &mut RecordStore<R, B>,
    id: u64,
    patch: R::Patch,
) -> Result<CmdResult<R>> {
    let record = store.edit(id, patch)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} updated ({}): {}",
        R::KIND,
        id,
        record.label()
    )));
    Ok(result.with_affected(vec![record]))
}
