//! Board Commands
//!
//! Frontend bindings for board-related endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::{from_response, id_path, to_args, ApiClient};
use crate::error::ClientResult;
use crate::models::{Board, BoardId};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct BoardNameArgs<'a> {
    name: &'a str,
}

// ========================
// Commands
// ========================

#[async_trait]
pub trait BoardCommands: Send + Sync {
    async fn list_boards(&self) -> ClientResult<Vec<Board>>;

    async fn get_board(&self, id: &BoardId) -> ClientResult<Board>;

    /// The dashboard re-fetches the list afterwards, so the created board
    /// is not decoded
    async fn create_board(&self, name: &str) -> ClientResult<()>;

    async fn update_board(&self, id: &BoardId, name: &str) -> ClientResult<()>;

    async fn delete_board(&self, id: &BoardId) -> ClientResult<()>;
}

#[async_trait]
impl BoardCommands for ApiClient {
    async fn list_boards(&self) -> ClientResult<Vec<Board>> {
        let response = self.invoke(Method::GET, "/getAllBoards", None).await?;
        from_response(response).await
    }

    async fn get_board(&self, id: &BoardId) -> ClientResult<Board> {
        let response = self
            .invoke(Method::GET, &id_path("/getBoard", id.as_str()), None)
            .await?;
        from_response(response).await
    }

    async fn create_board(&self, name: &str) -> ClientResult<()> {
        let args = to_args(&BoardNameArgs { name })?;
        self.invoke(Method::POST, "/createBoard", Some(args)).await?;
        Ok(())
    }

    async fn update_board(&self, id: &BoardId, name: &str) -> ClientResult<()> {
        let args = to_args(&BoardNameArgs { name })?;
        self.invoke(Method::PUT, &id_path("/updateBoard", id.as_str()), Some(args))
            .await?;
        Ok(())
    }

    async fn delete_board(&self, id: &BoardId) -> ClientResult<()> {
        self.invoke(Method::DELETE, &id_path("/deleteBoard", id.as_str()), None)
            .await?;
        Ok(())
    }
}
