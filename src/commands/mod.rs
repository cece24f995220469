//! REST API Command Wrappers
//!
//! Frontend bindings to the board server, organized by domain. Each domain
//! is a trait so the sync layer can run against any backend; `ApiClient`
//! implements all of them over HTTP.

mod auth;
mod board;
mod column;
mod task;

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::session::TokenStore;

// Re-export all public items
pub use auth::*;
pub use board::*;
pub use column::*;
pub use task::*;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Characters kept verbatim in an id path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// HTTP client for the board server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_client(Client::new(), base_url, tokens)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticated call: attaches `Authorization: Bearer <token>`
    async fn invoke(&self, method: Method, path: &str, args: Option<Value>) -> ClientResult<Response> {
        self.dispatch(method, path, args, true).await
    }

    /// Call without credentials (login, registration)
    async fn invoke_public(&self, method: Method, path: &str, args: Option<Value>) -> ClientResult<Response> {
        self.dispatch(method, path, args, false).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        args: Option<Value>,
        authenticated: bool,
    ) -> ClientResult<Response> {
        log::debug!("{} {}", method, path);
        let mut request = self.client.request(method.clone(), format!("{}{}", self.base_url, path));
        if authenticated {
            match self.tokens.load() {
                Some(token) => request = request.bearer_auth(token),
                None => log::debug!("No token stored, sending {} {} unauthenticated", method, path),
            }
        }
        if let Some(body) = args {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("{} {} failed with {}", method, path, status);
        Err(ClientError::from_status(status.as_u16(), body))
    }
}

fn to_args<T: Serialize>(args: &T) -> ClientResult<Value> {
    serde_json::to_value(args).map_err(|e| ClientError::Validation(e.to_string()))
}

async fn from_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    Ok(response.json::<T>().await?)
}

/// `/prefix/<encoded id>`
fn id_path(prefix: &str, id: &str) -> String {
    format!("{}/{}", prefix, utf8_percent_encode(id, PATH_SEGMENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::session::MemoryTokenStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:3000/", Arc::new(MemoryTokenStore::default()));
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_id_path_encodes_unsafe_characters() {
        assert_eq!(id_path("/tasks", "65f0a1-b_c"), "/tasks/65f0a1-b_c");
        assert_eq!(id_path("/tasks", "a/b c"), "/tasks/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_reqwest_errors_split_into_decode_and_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks/A"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"_id":"#))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Arc::new(MemoryTokenStore::default()));
        let response = client.invoke(Method::GET, "/tasks/A", None).await.unwrap();
        let err = from_response::<Vec<Task>>(response).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        let gone = {
            let server = MockServer::start().await;
            server.uri()
        };
        let client = ApiClient::new(gone, Arc::new(MemoryTokenStore::default()));
        let err = client.invoke(Method::GET, "/tasks/A", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
