//! Frontend Models
//!
//! Data structures matching backend entities, plus the materialized board
//! the view renders from.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Server-assigned board id
    BoardId
);
entity_id!(
    /// Server-assigned column id
    ColumnId
);
entity_id!(
    /// Server-assigned task id
    TaskId
);

/// Board data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: BoardId,
    pub name: String,
}

/// Column data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "_id")]
    pub id: ColumnId,
    #[serde(rename = "boardId", default)]
    pub board_id: BoardId,
    pub title: String,
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    #[serde(rename = "columnId", default)]
    pub column_id: ColumnId,
    pub content: String,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, column_id: impl Into<ColumnId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            content: content.into(),
        }
    }
}

/// A column with its ordered, materialized task list
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub title: String,
    /// Render order
    pub tasks: Vec<Task>,
}

impl ColumnState {
    pub fn from_column(column: Column, tasks: Vec<Task>) -> Self {
        Self {
            id: column.id,
            board_id: column.board_id,
            title: column.title,
            tasks,
        }
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|task| task.id.clone()).collect()
    }

    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == task_id)
    }
}

/// Column id -> column, in board order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    columns: IndexMap<ColumnId, ColumnState>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: impl IntoIterator<Item = ColumnState>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(|column| (column.id.clone(), column))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnState> {
        self.columns.values()
    }

    pub fn column(&self, id: &ColumnId) -> Option<&ColumnState> {
        self.columns.get(id)
    }

    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut ColumnState> {
        self.columns.get_mut(id)
    }

    /// Append a column, or replace one with the same id in place
    pub fn insert_column(&mut self, column: ColumnState) {
        self.columns.insert(column.id.clone(), column);
    }

    /// Remove a column (and its tasks), keeping the order of the rest
    pub fn remove_column(&mut self, id: &ColumnId) -> Option<ColumnState> {
        self.columns.shift_remove(id)
    }

    /// Column containing the task and the task's index in it
    pub fn locate_task(&self, task_id: &TaskId) -> Option<(ColumnId, usize)> {
        self.columns
            .values()
            .find_map(|column| column.position_of(task_id).map(|idx| (column.id.clone(), idx)))
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.columns
            .values()
            .flat_map(|column| column.tasks.iter())
            .find(|task| &task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.columns
            .values_mut()
            .flat_map(|column| column.tasks.iter_mut())
            .find(|task| &task.id == task_id)
    }

    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let (column_id, idx) = self.locate_task(task_id)?;
        self.columns
            .get_mut(&column_id)
            .map(|column| column.tasks.remove(idx))
    }

    pub fn task_count(&self) -> usize {
        self.columns.values().map(|column| column.tasks.len()).sum()
    }

    /// Every task id on the board, column by column
    pub fn all_task_ids(&self) -> Vec<TaskId> {
        self.columns.values().flat_map(ColumnState::task_ids).collect()
    }

    /// Full per-column ordering, in board order
    pub fn to_payload(&self) -> ReorderPayload {
        ReorderPayload {
            tasks_by_column: self
                .columns
                .values()
                .map(|column| ColumnOrder {
                    column_id: column.id.clone(),
                    task_ids: column.task_ids(),
                })
                .collect(),
        }
    }
}

/// Ordering of one column in a reorder payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOrder {
    pub column_id: ColumnId,
    pub task_ids: Vec<TaskId>,
}

/// Body of `PATCH /tasks-reorder`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPayload {
    pub tasks_by_column: Vec<ColumnOrder>,
}
