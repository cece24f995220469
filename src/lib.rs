//! Kanban board client core
//!
//! Everything a board front-end needs below the rendering layer: the
//! board model, drag-and-drop reordering, the REST bindings and the sync
//! coordinator that keeps local state and the server in step.

pub mod commands;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod reorder;
pub mod session;
pub mod store;
pub mod sync;

#[cfg(test)]
mod tests;

pub use board_dragdrop::{DragTracker, DropEvent, DropTarget};
pub use commands::{ApiClient, AuthCommands, BoardCommands, ColumnCommands, TaskCommands};
pub use config::ClientConfig;
pub use context::AppContext;
pub use dashboard::Dashboard;
pub use error::{ClientError, ClientResult};
pub use models::{Board, BoardId, BoardState, Column, ColumnId, ColumnState, ReorderPayload, Task, TaskId};
pub use reorder::{plan_reorder, BoardDropTarget, DragGesture, ReorderPlan};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use store::{BoardStore, EditState, EntityKey};
pub use sync::{BoardSync, ReconcilePolicy, SyncOutcome};
