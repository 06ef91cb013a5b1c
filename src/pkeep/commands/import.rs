use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::interchange;
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};
use std::path::Path;

pub fn run<R: Record, B: StorageBackend>(
    store: &mut RecordStore<R, B>,
    path: &Path,
) -> Result<CmdResult<R>> {
    let first_new = store.len();
    let count = interchange::import(store, path)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} {} from {}",
        count,
        R::KIND.plural(),
        path.display()
    )));
    let imported = store.records()[first_new..].to_vec();
    Ok(result.with_affected(imported).with_path(path.to_path_buf()))
}
