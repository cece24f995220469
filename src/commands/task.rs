//! Task Commands
//!
//! Frontend bindings for task-related endpoints, including the bulk reorder.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::{from_response, id_path, to_args, ApiClient};
use crate::error::ClientResult;
use crate::models::{ColumnId, ReorderPayload, Task, TaskId};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateTaskArgs<'a> {
    content: &'a str,
    #[serde(rename = "columnId")]
    column_id: &'a ColumnId,
}

#[derive(Serialize)]
struct TaskContentArgs<'a> {
    content: &'a str,
}

// ========================
// Commands
// ========================

#[async_trait]
pub trait TaskCommands: Send + Sync {
    /// Returns the task with its server-assigned id
    async fn create_task(&self, column_id: &ColumnId, content: &str) -> ClientResult<Task>;

    async fn list_tasks(&self, column_id: &ColumnId) -> ClientResult<Vec<Task>>;

    async fn update_task(&self, id: &TaskId, content: &str) -> ClientResult<()>;

    async fn delete_task(&self, id: &TaskId) -> ClientResult<()>;

    /// Replace the task ordering of every listed column
    async fn reorder_tasks(&self, payload: &ReorderPayload) -> ClientResult<()>;
}

#[async_trait]
impl TaskCommands for ApiClient {
    async fn create_task(&self, column_id: &ColumnId, content: &str) -> ClientResult<Task> {
        let args = to_args(&CreateTaskArgs { content, column_id })?;
        let response = self.invoke(Method::POST, "/createTask", Some(args)).await?;
        from_response(response).await
    }

    async fn list_tasks(&self, column_id: &ColumnId) -> ClientResult<Vec<Task>> {
        let response = self
            .invoke(Method::GET, &id_path("/tasks", column_id.as_str()), None)
            .await?;
        from_response(response).await
    }

    async fn update_task(&self, id: &TaskId, content: &str) -> ClientResult<()> {
        let args = to_args(&TaskContentArgs { content })?;
        self.invoke(Method::PUT, &id_path("/updateTask", id.as_str()), Some(args))
            .await?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> ClientResult<()> {
        self.invoke(Method::DELETE, &id_path("/deleteTask", id.as_str()), None)
            .await?;
        Ok(())
    }

    async fn reorder_tasks(&self, payload: &ReorderPayload) -> ClientResult<()> {
        let args = to_args(payload)?;
        self.invoke(Method::PATCH, "/tasks-reorder", Some(args)).await?;
        Ok(())
    }
}
