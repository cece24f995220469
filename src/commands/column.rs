//! Column Commands
//!
//! Frontend bindings for column-related endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::{from_response, id_path, to_args, ApiClient};
use crate::error::ClientResult;
use crate::models::{BoardId, Column, ColumnId};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateColumnArgs<'a> {
    #[serde(rename = "boardId")]
    board_id: &'a BoardId,
    title: &'a str,
}

#[derive(Serialize)]
struct ColumnTitleArgs<'a> {
    title: &'a str,
}

// ========================
// Commands
// ========================

#[async_trait]
pub trait ColumnCommands: Send + Sync {
    /// Returns the column with its server-assigned id
    async fn create_column(&self, board_id: &BoardId, title: &str) -> ClientResult<Column>;

    async fn list_columns(&self, board_id: &BoardId) -> ClientResult<Vec<Column>>;

    async fn update_column(&self, id: &ColumnId, title: &str) -> ClientResult<()>;

    async fn delete_column(&self, id: &ColumnId) -> ClientResult<()>;
}

#[async_trait]
impl ColumnCommands for ApiClient {
    async fn create_column(&self, board_id: &BoardId, title: &str) -> ClientResult<Column> {
        let args = to_args(&CreateColumnArgs { board_id, title })?;
        let response = self.invoke(Method::POST, "/createColumn", Some(args)).await?;
        from_response(response).await
    }

    async fn list_columns(&self, board_id: &BoardId) -> ClientResult<Vec<Column>> {
        let response = self
            .invoke(Method::GET, &id_path("/columns", board_id.as_str()), None)
            .await?;
        from_response(response).await
    }

    async fn update_column(&self, id: &ColumnId, title: &str) -> ClientResult<()> {
        let args = to_args(&ColumnTitleArgs { title })?;
        self.invoke(Method::PUT, &id_path("/updateColumn", id.as_str()), Some(args))
            .await?;
        Ok(())
    }

    async fn delete_column(&self, id: &ColumnId) -> ClientResult<()> {
        self.invoke(Method::DELETE, &id_path("/deleteColumn", id.as_str()), None)
            .await?;
        Ok(())
    }
}
