//! Auth Commands
//!
//! Registration and login. Both are unauthenticated calls.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{from_response, to_args, ApiClient};
use crate::error::{ClientError, ClientResult};

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

// ========================
// Commands
// ========================

#[async_trait]
pub trait AuthCommands: Send + Sync {
    async fn register(&self, form: &Registration) -> ClientResult<()>;

    /// Returns the bearer token
    async fn login(&self, credentials: &Credentials) -> ClientResult<String>;
}

#[async_trait]
impl AuthCommands for ApiClient {
    async fn register(&self, form: &Registration) -> ClientResult<()> {
        self.invoke_public(Method::POST, "/reg", Some(to_args(form)?)).await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
        let response = self
            .invoke_public(Method::POST, "/log", Some(to_args(credentials)?))
            .await?;
        let body: LoginResponse = from_response(response).await?;
        body.token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::Auth("login response carried no token".to_string()))
    }
}
