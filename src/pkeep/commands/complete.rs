use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Task, TaskPatch};
use crate::store::{RecordStore, StorageBackend};

/// Marks a task done (`done = true`) or reopens it.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<Task, B>,
    id: u64,
    done: bool,
) -> Result<CmdResult<Task>> {
    let patch = TaskPatch {
        done: Some(done),
        ..Default::default()
    };
    let task = store.edit(id, patch)?;

    let mut result = CmdResult::default();
    let verb = if done { "completed" } else { "reopened" };
    result.add_message(CmdMessage::success(format!(
        "Task {} ({}): {}",
        verb, id, task.title
    )));
    Ok(result.with_affected(vec![task]))
}
