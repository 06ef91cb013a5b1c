use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};

pub fn run<R: Record, B: StorageBackend>(
    store: &RecordStore<R, B>,
    term: &str,
) -> Result<CmdResult<R>> {
    let listed: Vec<R> = store
        .records()
        .iter()
        .filter(|r| r.matches(term))
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No {} match \"{}\".",
            R::KIND.plural(),
            term
        )));
    }
    Ok(result.with_listed(listed))
}
