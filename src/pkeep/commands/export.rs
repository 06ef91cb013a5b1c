use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::interchange::{self, ExportOutcome};
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};
use std::path::Path;

pub fn run<R: Record, B: StorageBackend>(
    store: &RecordStore<R, B>,
    path: &Path,
) -> Result<CmdResult<R>> {
    let mut result = CmdResult::default();
    match interchange::export(store.records(), path)? {
        ExportOutcome::Empty => {
            result.add_message(CmdMessage::info(format!(
                "No {} to export.",
                R::KIND.plural()
            )));
            Ok(result)
        }
        ExportOutcome::Written { path, count } => {
            result.add_message(CmdMessage::success(format!(
                "Exported {} {} to {}",
                count,
                R::KIND.plural(),
                path.display()
            )));
            Ok(result.with_path(path))
        }
    }
}
