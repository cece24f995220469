//! Sync Coordinator
//!
//! Applies user mutations to the board store and confirms them with the
//! server. Creates wait for the server id; updates, deletes and reorders
//! are applied first and reconciled when the server answers.

use serde::{Deserialize, Serialize};

use crate::commands::{ColumnCommands, TaskCommands};
use crate::error::{ClientError, ClientResult};
use crate::models::{BoardId, BoardState, ColumnId, ColumnState, Task, TaskId};
use crate::reorder::{plan_reorder, DragGesture};
use crate::store::{BoardStore, EditState, EntityKey};


/// What happens to local state when the server rejects an optimistic change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Restore the board and edit state from before the change
    #[default]
    Rollback,
    /// Keep the local change and mark the entity `Stale`
    KeepLocal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Server confirmed the change
    Synced,
    /// Nothing to send
    Unchanged,
}

/// One open board: its store plus the backend it is confirmed against
pub struct BoardSync<A> {
    api: A,
    board_id: BoardId,
    store: BoardStore,
    policy: ReconcilePolicy,
}

impl<A> BoardSync<A>
where
    A: ColumnCommands + TaskCommands,
{
    /// Fetch the board's columns, then each column's tasks in turn, and
    /// publish the result in one shot
    pub async fn load(api: A, board_id: BoardId, policy: ReconcilePolicy) -> ClientResult<Self> {
        let mut sync = Self {
            api,
            board_id,
            store: BoardStore::default(),
            policy,
        };
        sync.reload().await?;
        Ok(sync)
    }

    pub async fn reload(&mut self) -> ClientResult<()> {
        let columns = self.api.list_columns(&self.board_id).await?;
        let mut loaded = Vec::with_capacity(columns.len());
        for column in columns {
            let tasks = self.api.list_tasks(&column.id).await?;
            loaded.push(ColumnState::from_column(column, tasks));
        }
        let state = BoardState::from_columns(loaded);
        log::info!(
            "Loaded board {}: {} columns, {} tasks",
            self.board_id,
            state.len(),
            state.task_count()
        );
        self.store.replace(state);
        Ok(())
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    pub fn state(&self) -> &BoardState {
        self.store.state()
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ReconcilePolicy) {
        self.policy = policy;
    }

    pub fn edit_state(&self, key: &EntityKey) -> EditState {
        self.store.edit_state(key)
    }

    // ========================
    // Reorder
    // ========================

    /// Apply a finished drag locally, then send the full ordering
    pub async fn drag_end(&mut self, gesture: DragGesture) -> ClientResult<SyncOutcome> {
        let Some(plan) = plan_reorder(self.store.state(), &gesture) else {
            log::debug!("Drag of {} changed nothing", gesture.active);
            return Ok(SyncOutcome::Unchanged);
        };

        let checkpoint = self.store.checkpoint();
        self.store.set_state(plan.state);
        let result = self.api.reorder_tasks(&plan.payload).await;
        self.settle(checkpoint, Change::Moved(EntityKey::Task(gesture.active)), result, "reorder")
    }

    // ========================
    // Tasks
    // ========================

    /// Create a task at the end of a column once the server assigns its id
    pub async fn add_task(&mut self, column_id: &ColumnId, content: &str) -> ClientResult<TaskId> {
        let content = non_empty(content, "Task content")?;
        if self.store.state().column(column_id).is_none() {
            return Err(ClientError::NotFound(format!("column {}", column_id)));
        }

        let mut task = self.api.create_task(column_id, content).await?;
        if task.column_id.as_str().is_empty() {
            task.column_id = column_id.clone();
        }
        let id = task.id.clone();
        self.store.add_task(column_id, task)?;
        log::info!("Created task {} in column {}", id, column_id);
        Ok(id)
    }

    pub fn begin_task_edit(&mut self, task_id: &TaskId) -> ClientResult<()> {
        let content = self.task(task_id)?.content.clone();
        self.store.begin_edit(EntityKey::Task(task_id.clone()), content)
    }

    pub fn set_task_draft(&mut self, task_id: &TaskId, draft: &str) -> ClientResult<()> {
        self.store.set_draft(&EntityKey::Task(task_id.clone()), draft)
    }

    pub fn cancel_task_edit(&mut self, task_id: &TaskId) {
        self.store.cancel_edit(&EntityKey::Task(task_id.clone()));
    }

    /// Commit the task's draft. An empty draft is rejected and the task
    /// stays in `Editing`.
    pub async fn save_task(&mut self, task_id: &TaskId) -> ClientResult<SyncOutcome> {
        let key = EntityKey::Task(task_id.clone());
        let draft = self.draft_of(&key)?;
        let content = non_empty(&draft, "Task content")?.to_string();

        if self.task(task_id)?.content == content {
            self.store.mark(key, EditState::Idle);
            return Ok(SyncOutcome::Unchanged);
        }

        let checkpoint = self.store.checkpoint();
        self.store.update_task_content(task_id, &content)?;
        self.store.mark(key.clone(), EditState::Saving);
        let result = self.api.update_task(task_id, &content).await;
        self.settle(checkpoint, Change::Saved(key), result, "update task")
    }

    pub async fn delete_task(&mut self, task_id: &TaskId) -> ClientResult<SyncOutcome> {
        let key = EntityKey::Task(task_id.clone());
        let checkpoint = self.store.checkpoint();
        self.store.remove_task(task_id)?;
        self.store.forget(&key);
        let result = self.api.delete_task(task_id).await;
        self.settle(checkpoint, Change::Deleted, result, "delete task")
    }

    // ========================
    // Columns
    // ========================

    /// Append a column once the server assigns its id
    pub async fn add_column(&mut self, title: &str) -> ClientResult<ColumnId> {
        let title = non_empty(title, "Column title")?;
        let column = self.api.create_column(&self.board_id, title).await?;
        let mut column = ColumnState::from_column(column, Vec::new());
        if column.board_id.as_str().is_empty() {
            column.board_id = self.board_id.clone();
        }
        let id = column.id.clone();
        self.store.add_column(column);
        log::info!("Created column {} on board {}", id, self.board_id);
        Ok(id)
    }

    pub fn begin_column_edit(&mut self, column_id: &ColumnId) -> ClientResult<()> {
        let title = self.column(column_id)?.title.clone();
        self.store.begin_edit(EntityKey::Column(column_id.clone()), title)
    }

    pub fn set_column_draft(&mut self, column_id: &ColumnId, draft: &str) -> ClientResult<()> {
        self.store.set_draft(&EntityKey::Column(column_id.clone()), draft)
    }

    pub fn cancel_column_edit(&mut self, column_id: &ColumnId) {
        self.store.cancel_edit(&EntityKey::Column(column_id.clone()));
    }

    pub async fn save_column(&mut self, column_id: &ColumnId) -> ClientResult<SyncOutcome> {
        let key = EntityKey::Column(column_id.clone());
        let draft = self.draft_of(&key)?;
        let title = non_empty(&draft, "Column title")?.to_string();

        if self.column(column_id)?.title == title {
            self.store.mark(key, EditState::Idle);
            return Ok(SyncOutcome::Unchanged);
        }

        let checkpoint = self.store.checkpoint();
        self.store.rename_column(column_id, &title)?;
        self.store.mark(key.clone(), EditState::Saving);
        let result = self.api.update_column(column_id, &title).await;
        self.settle(checkpoint, Change::Saved(key), result, "rename column")
    }

    /// Remove a column and its tasks
    pub async fn delete_column(&mut self, column_id: &ColumnId) -> ClientResult<SyncOutcome> {
        let key = EntityKey::Column(column_id.clone());
        let checkpoint = self.store.checkpoint();
        self.store.remove_column(column_id)?;
        self.store.forget(&key);
        let result = self.api.delete_column(column_id).await;
        self.settle(checkpoint, Change::Deleted, result, "delete column")
    }

    // ========================
    // Helpers
    // ========================

    fn task(&self, task_id: &TaskId) -> ClientResult<&Task> {
        self.store
            .state()
            .task(task_id)
            .ok_or_else(|| ClientError::NotFound(format!("task {}", task_id)))
    }

    fn column(&self, column_id: &ColumnId) -> ClientResult<&ColumnState> {
        self.store
            .state()
            .column(column_id)
            .ok_or_else(|| ClientError::NotFound(format!("column {}", column_id)))
    }

    fn draft_of(&self, key: &EntityKey) -> ClientResult<String> {
        self.store
            .draft(key)
            .map(str::to_string)
            .ok_or_else(|| ClientError::Validation(format!("{:?} is not being edited", key)))
    }

    /// Finish an optimistic change according to the reconcile policy
    fn settle(
        &mut self,
        checkpoint: BoardStore,
        change: Change,
        result: ClientResult<()>,
        action: &str,
    ) -> ClientResult<SyncOutcome> {
        let err = match result {
            Ok(()) => {
                if let Change::Saved(key) = change {
                    self.store.mark(key, EditState::Idle);
                }
                log::info!("{} confirmed on board {}", action, self.board_id);
                return Ok(SyncOutcome::Synced);
            }
            Err(err) => err,
        };

        match self.policy {
            ReconcilePolicy::Rollback => {
                log::warn!("{} failed, restoring board {}: {}", action, self.board_id, err);
                self.store.restore(checkpoint);
                if let Change::Saved(key) = change {
                    self.store.mark(key, EditState::Idle);
                }
            }
            ReconcilePolicy::KeepLocal => {
                log::warn!("{} failed, keeping local change on board {}: {}", action, self.board_id, err);
                match change {
                    Change::Saved(key) => self.store.mark(key, EditState::Stale),
                    // An entity being edited keeps its edit state
                    Change::Moved(key) => {
                        if self.store.edit_state(&key) == EditState::Idle {
                            self.store.mark(key, EditState::Stale);
                        }
                    }
                    Change::Deleted => {}
                }
            }
        }
        Err(err)
    }
}

/// Kind of optimistic change being settled, keyed by the entity it touched
enum Change {
    /// Text of the entity was replaced
    Saved(EntityKey),
    /// Task changed position only
    Moved(EntityKey),
    /// Entity removed from the board
    Deleted,
}

/// Trimmed text, or a validation error naming the field
fn non_empty<'a>(text: &'a str, what: &str) -> ClientResult<&'a str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(trimmed)
}
