//! Application Context
//!
//! Shared state for one signed-in client: configuration, the single token
//! store and the HTTP client every view works through.

use std::sync::Arc;

use crate::commands::ApiClient;
use crate::config::ClientConfig;
use crate::dashboard::Dashboard;
use crate::error::ClientResult;
use crate::models::BoardId;
use crate::session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
use crate::sync::BoardSync;

pub const APP_NAME: &str = "kanban-board";

#[derive(Clone)]
pub struct AppContext {
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
    api: ApiClient,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let tokens: Arc<dyn TokenStore> = match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(MemoryTokenStore::default()),
        };
        let api = ApiClient::new(config.api_base_url.clone(), tokens.clone());
        Ok(Self {
            config,
            tokens,
            api,
        })
    }

    /// Start the rolling file logger when a log directory is configured.
    /// Returns whether a logger was installed.
    pub fn init_logging(&self) -> ClientResult<bool> {
        let Some(dir) = &self.config.log_dir else {
            return Ok(false);
        };
        rolling_logger::init_logger(dir, APP_NAME)?;
        rolling_logger::info(&format!("Client started against {}", self.config.api_base_url))?;
        Ok(true)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        self.tokens.clone()
    }

    pub fn session(&self) -> Session<ApiClient> {
        Session::new(self.api.clone(), self.tokens.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.load().is_some()
    }

    pub fn dashboard(&self) -> Dashboard<ApiClient> {
        Dashboard::new(self.api.clone())
    }

    /// Load a board and return its coordinator, using the configured
    /// reconcile policy
    pub async fn open_board(&self, board_id: BoardId) -> ClientResult<BoardSync<ApiClient>> {
        BoardSync::load(self.api.clone(), board_id, self.config.reconcile).await
    }
}
