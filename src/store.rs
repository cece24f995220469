//! Board State Store
//!
//! Single source of truth for the visible board: the materialized columns
//! and tasks plus the edit state of every task and column.

use std::collections::HashMap;

use crate::error::{ClientError, ClientResult};
use crate::models::{BoardState, ColumnId, ColumnState, Task, TaskId};

/// Entity whose edit state is tracked
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Task(TaskId),
    Column(ColumnId),
}

/// Per-entity edit state machine:
/// `Idle -> Editing -> Saving -> Idle`, or `-> Stale` when a failed save
/// left the local copy diverged from the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { draft: String },
    Saving,
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    state: BoardState,
    edits: HashMap<EntityKey, EditState>,
}

impl BoardStore {
    pub fn new(state: BoardState) -> Self {
        Self {
            state,
            edits: HashMap::new(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Publish a freshly loaded board; all edit state is dropped
    pub fn replace(&mut self, state: BoardState) {
        self.state = state;
        self.edits.clear();
    }

    /// Board and edit state as they are now
    pub fn checkpoint(&self) -> BoardStore {
        self.clone()
    }

    /// Return to a checkpoint, edit state included
    pub fn restore(&mut self, checkpoint: BoardStore) {
        *self = checkpoint;
    }

    /// Swap in a new board, keeping edit state
    pub fn set_state(&mut self, state: BoardState) {
        self.state = state;
    }

    // ========================
    // Edit State
    // ========================

    pub fn edit_state(&self, key: &EntityKey) -> EditState {
        self.edits.get(key).cloned().unwrap_or_default()
    }

    pub fn draft(&self, key: &EntityKey) -> Option<&str> {
        match self.edits.get(key) {
            Some(EditState::Editing { draft }) => Some(draft.as_str()),
            _ => None,
        }
    }

    pub fn begin_edit(&mut self, key: EntityKey, current: String) -> ClientResult<()> {
        if matches!(self.edits.get(&key), Some(EditState::Saving)) {
            return Err(ClientError::Validation(format!("{:?} is being saved", key)));
        }
        self.edits.insert(key, EditState::Editing { draft: current });
        Ok(())
    }

    pub fn set_draft(&mut self, key: &EntityKey, text: &str) -> ClientResult<()> {
        match self.edits.get_mut(key) {
            Some(EditState::Editing { draft }) => {
                *draft = text.to_string();
                Ok(())
            }
            _ => Err(ClientError::Validation(format!("{:?} is not being edited", key))),
        }
    }

    pub fn cancel_edit(&mut self, key: &EntityKey) {
        if matches!(self.edits.get(key), Some(EditState::Editing { .. })) {
            self.edits.remove(key);
        }
    }

    pub fn mark(&mut self, key: EntityKey, state: EditState) {
        if state == EditState::Idle {
            self.edits.remove(&key);
        } else {
            self.edits.insert(key, state);
        }
    }

    pub fn forget(&mut self, key: &EntityKey) {
        self.edits.remove(key);
    }

    /// Every entity not in `Idle`
    pub fn edits(&self) -> impl Iterator<Item = (&EntityKey, &EditState)> {
        self.edits.iter()
    }

    // ========================
    // Store Helper Functions
    // ========================

    /// Append a confirmed task to its column
    pub fn add_task(&mut self, column_id: &ColumnId, task: Task) -> ClientResult<()> {
        let column = self
            .state
            .column_mut(column_id)
            .ok_or_else(|| ClientError::NotFound(format!("column {}", column_id)))?;
        column.tasks.push(task);
        Ok(())
    }

    pub fn update_task_content(&mut self, task_id: &TaskId, content: &str) -> ClientResult<()> {
        let task = self
            .state
            .task_mut(task_id)
            .ok_or_else(|| ClientError::NotFound(format!("task {}", task_id)))?;
        task.content = content.to_string();
        Ok(())
    }

    pub fn remove_task(&mut self, task_id: &TaskId) -> ClientResult<Task> {
        self.state
            .remove_task(task_id)
            .ok_or_else(|| ClientError::NotFound(format!("task {}", task_id)))
    }

    pub fn add_column(&mut self, column: ColumnState) {
        self.state.insert_column(column);
    }

    pub fn rename_column(&mut self, column_id: &ColumnId, title: &str) -> ClientResult<()> {
        let column = self
            .state
            .column_mut(column_id)
            .ok_or_else(|| ClientError::NotFound(format!("column {}", column_id)))?;
        column.title = title.to_string();
        Ok(())
    }

    /// Remove a column with its tasks; edit state of those tasks goes too
    pub fn remove_column(&mut self, column_id: &ColumnId) -> ClientResult<ColumnState> {
        let column = self
            .state
            .remove_column(column_id)
            .ok_or_else(|| ClientError::NotFound(format!("column {}", column_id)))?;
        for task in &column.tasks {
            self.edits.remove(&EntityKey::Task(task.id.clone()));
        }
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoardId;

    fn store() -> BoardStore {
        BoardStore::new(BoardState::from_columns(vec![ColumnState {
            id: ColumnId::new("A"),
            board_id: BoardId::new("b1"),
            title: "To Do".to_string(),
            tasks: vec![Task::new("T1", "A", "one"), Task::new("T2", "A", "two")],
        }]))
    }

    #[test]
    fn test_edit_lifecycle() {
        let mut store = store();
        let key = EntityKey::Task(TaskId::new("T1"));
        assert_eq!(store.edit_state(&key), EditState::Idle);

        store.begin_edit(key.clone(), "one".to_string()).unwrap();
        store.set_draft(&key, "uno").unwrap();
        assert_eq!(store.draft(&key), Some("uno"));

        store.mark(key.clone(), EditState::Saving);
        assert!(store.begin_edit(key.clone(), "x".to_string()).is_err());
        assert!(store.set_draft(&key, "x").is_err());

        store.mark(key.clone(), EditState::Idle);
        assert_eq!(store.edit_state(&key), EditState::Idle);
    }

    #[test]
    fn test_cancel_only_affects_editing() {
        let mut store = store();
        let key = EntityKey::Column(ColumnId::new("A"));
        store.mark(key.clone(), EditState::Stale);
        store.cancel_edit(&key);
        assert_eq!(store.edit_state(&key), EditState::Stale);

        store.begin_edit(key.clone(), "To Do".to_string()).unwrap();
        store.cancel_edit(&key);
        assert_eq!(store.edit_state(&key), EditState::Idle);
    }

    #[test]
    fn test_helpers_report_missing_entities() {
        let mut store = store();
        assert!(matches!(
            store.update_task_content(&TaskId::new("nope"), "x"),
            Err(ClientError::NotFound(_))
        ));
        assert!(store.add_task(&ColumnId::new("Z"), Task::new("T3", "Z", "three")).is_err());
        assert!(store.remove_column(&ColumnId::new("Z")).is_err());
    }

    #[test]
    fn test_remove_column_drops_task_edits() {
        let mut store = store();
        let key = EntityKey::Task(TaskId::new("T2"));
        store.begin_edit(key.clone(), "two".to_string()).unwrap();

        let removed = store.remove_column(&ColumnId::new("A")).unwrap();
        assert_eq!(removed.tasks.len(), 2);
        assert_eq!(store.edit_state(&key), EditState::Idle);
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_restore_brings_back_board_and_drafts() {
        let mut store = store();
        let key = EntityKey::Task(TaskId::new("T1"));
        store.begin_edit(key.clone(), "one".to_string()).unwrap();
        let checkpoint = store.checkpoint();

        store.remove_task(&TaskId::new("T1")).unwrap();
        store.forget(&key);
        assert_eq!(store.edits().count(), 0);

        store.restore(checkpoint);
        assert!(store.state().task(&TaskId::new("T1")).is_some());
        assert_eq!(store.draft(&key), Some("one"));
    }

    #[test]
    fn test_replace_clears_edits() {
        let mut store = store();
        let key = EntityKey::Task(TaskId::new("T1"));
        store.mark(key.clone(), EditState::Stale);
        store.replace(BoardState::new());
        assert_eq!(store.edit_state(&key), EditState::Idle);
    }
}
