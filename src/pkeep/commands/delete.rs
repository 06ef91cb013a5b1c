use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};

pub fn run<R: Record, B: StorageBackend>(
    store: &mut RecordStore<R, B>,
    id: u64,
) -> Result<CmdResult<R>> {
    let removed = store.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} deleted ({}): {}",
        R::KIND,
        id,
        removed.label()
    )));
    Ok(result.with_affected(vec![removed]))
}
