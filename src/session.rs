//! Session
//!
//! Login, registration and the bearer token. Every context owns exactly one
//! `TokenStore`: the API client reads the token from it and only the session
//! writes or clears it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::commands::{AuthCommands, Credentials, Registration};
use crate::error::{ClientError, ClientResult};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Single read/write path for the bearer token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Token kept for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// Token persisted as JSON; survives restarts until logout
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read token file {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<StoredToken>(&raw) {
            Ok(stored) => Some(stored.token),
            Err(e) => {
                log::warn!("Ignoring malformed token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&StoredToken {
            token: token.to_string(),
        })
        .map_err(|e| ClientError::Storage(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub struct Session<A> {
    api: A,
    tokens: Arc<dyn TokenStore>,
}

impl<A: AuthCommands> Session<A> {
    pub fn new(api: A, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.load().is_some()
    }

    /// Log in, store the returned token and hand it back. Nothing is
    /// stored on failure.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<String> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "email and password are required".to_string(),
            ));
        }
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let token = self.api.login(&credentials).await.map_err(|e| {
            log::warn!("Login failed: {}", e);
            e
        })?;
        self.tokens.save(&token)?;
        log::info!("Logged in");
        Ok(token)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<()> {
        if email.trim().is_empty() {
            return Err(ClientError::Validation("email is required".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let registration = Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.api.register(&registration).await?;
        log::info!("Registered {}", registration.email);
        Ok(())
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.tokens.clear()?;
        log::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeAuth {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AuthCommands for FakeAuth {
        async fn register(&self, form: &Registration) -> ClientResult<()> {
            self.calls.lock().unwrap().push(format!("reg {}", form.email));
            Ok(())
        }

        async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
            self.calls.lock().unwrap().push(format!("log {}", credentials.email));
            if credentials.password == "correct-horse" {
                Ok("tok-123".to_string())
            } else {
                Err(ClientError::Auth("invalid credentials".to_string()))
            }
        }
    }

    fn session() -> (Session<FakeAuth>, Arc<MemoryTokenStore>) {
        let tokens = Arc::new(MemoryTokenStore::default());
        (Session::new(FakeAuth::default(), tokens.clone()), tokens)
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (session, tokens) = session();
        let token = session.login("ann@example.com", "correct-horse").await.unwrap();
        assert_eq!(token, "tok-123");
        assert_eq!(tokens.load().as_deref(), Some("tok-123"));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_invalid_login_stores_nothing() {
        let (session, tokens) = session();
        let err = session.login("ann@example.com", "wrong").await.unwrap_err();
        assert!(err.is_auth());
        assert!(tokens.load().is_none());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_short_password_rejected_locally() {
        let (session, _) = session();
        let err = session.register("Ann", "ann@example.com", "short").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(session.api.calls.lock().unwrap().is_empty());

        session.register("Ann", "ann@example.com", "long enough").await.unwrap();
        assert_eq!(session.api.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let (session, tokens) = session();
        session.login("ann@example.com", "correct-horse").await.unwrap();
        session.logout().unwrap();
        assert!(tokens.load().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth").join("token.json"));

        assert!(store.load().is_none());
        store.save("tok-abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("tok-abc"));

        // A second store on the same path sees the same token
        let reopened = FileTokenStore::new(store.path());
        assert_eq!(reopened.load().as_deref(), Some("tok-abc"));

        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();
        assert!(FileTokenStore::new(path).load().is_none());
    }
}
