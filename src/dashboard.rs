//! Board Dashboard
//!
//! The list of boards the user owns. Every confirmed mutation re-fetches
//! the list.

use crate::commands::BoardCommands;
use crate::error::{ClientError, ClientResult};
use crate::models::{Board, BoardId};

pub struct Dashboard<A> {
    api: A,
    boards: Vec<Board>,
}

impl<A: BoardCommands> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            boards: Vec::new(),
        }
    }

    /// Boards as of the last refresh
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub async fn refresh(&mut self) -> ClientResult<&[Board]> {
        self.boards = self.api.list_boards().await?;
        log::debug!("Dashboard holds {} boards", self.boards.len());
        Ok(&self.boards)
    }

    pub async fn get(&self, id: &BoardId) -> ClientResult<Board> {
        self.api.get_board(id).await
    }

    pub async fn create(&mut self, name: &str) -> ClientResult<()> {
        let name = board_name(name)?;
        self.api.create_board(name).await?;
        log::info!("Created board {:?}", name);
        self.refresh_after("create").await;
        Ok(())
    }

    pub async fn rename(&mut self, id: &BoardId, name: &str) -> ClientResult<()> {
        let name = board_name(name)?;
        self.api.update_board(id, name).await?;
        log::info!("Renamed board {} to {:?}", id, name);
        self.refresh_after("rename").await;
        Ok(())
    }

    pub async fn delete(&mut self, id: &BoardId) -> ClientResult<()> {
        self.api.delete_board(id).await?;
        log::info!("Deleted board {}", id);
        self.refresh_after("delete").await;
        Ok(())
    }

    /// Re-fetch after a confirmed mutation; a failed fetch is only logged
    async fn refresh_after(&mut self, action: &str) {
        if let Err(e) = self.refresh().await {
            log::warn!("Board list refresh after {} failed: {}", action, e);
        }
    }
}

fn board_name(name: &str) -> ClientResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::Validation("Board name cannot be empty".to_string()));
    }
    Ok(name)
}
