use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Priority, Record, Task};
use crate::store::{RecordStore, StorageBackend};

pub fn run<R: Record, B: StorageBackend>(store: &RecordStore<R, B>) -> Result<CmdResult<R>> {
    let Some(records) = store.list() else {
        return Ok(empty_result(R::KIND.plural()));
    };
    Ok(CmdResult::default().with_listed(records.cloned().collect()))
}

/// Which tasks to show. The default shows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub pending_only: bool,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn accepts(&self, task: &Task) -> bool {
        if self.pending_only && task.done {
            return false;
        }
        self.priority.map_or(true, |p| p == task.priority)
    }
}

pub fn tasks<B: StorageBackend>(
    store: &RecordStore<Task, B>,
    filter: TaskFilter,
) -> Result<CmdResult<Task>> {
    let Some(records) = store.list() else {
        return Ok(empty_result("tasks"));
    };
    let listed: Vec<Task> = records.filter(|t| filter.accepts(t)).cloned().collect();
    if listed.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No tasks match the filter."));
        return Ok(result);
    }
    Ok(CmdResult::default().with_listed(listed))
}

fn empty_result<R>(plural: &str) -> CmdResult<R> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("No {} yet.", plural)));
    result
}
