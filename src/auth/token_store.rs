//! Token persistence
//!
//! One token record at a time. The provider's response is kept as-is so the
//! file mirrors exactly what Google returned.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Token endpoint response, stored verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenRecord {
    body: Value,
}

impl TokenRecord {
    pub fn from_value(body: Value) -> Self {
        Self { body }
    }

    pub fn as_value(&self) -> &Value {
        &self.body
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.str_field("access_token").filter(|t| !t.is_empty())
    }

    pub fn token_type(&self) -> Option<&str> {
        self.str_field("token_type")
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.str_field("refresh_token")
    }

    pub fn scope(&self) -> Option<&str> {
        self.str_field("scope")
    }

    /// Lifetime hint in seconds, as reported at exchange time
    pub fn expires_in(&self) -> Option<u64> {
        self.body.get("expires_in").and_then(Value::as_u64)
    }
}

/// Where the gateway keeps its single token record
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet
    async fn load(&self) -> AppResult<Option<TokenRecord>>;

    /// Replaces any existing record
    async fn save(&self, record: &TokenRecord) -> AppResult<()>;
}

/// JSON file in the working directory (`google_tokens.json` by default).
///
/// No locking: concurrent writers race and the last one wins.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> AppResult<Option<TokenRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                log_error(&format!("❌ [TokenStore] Failed to read {}: {}", self.path.display(), e));
                return Err(AppError::StorageError(format!(
                    "Failed to read token file: {}",
                    e
                )));
            }
        };

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            log_error(&format!("❌ [TokenStore] Corrupt token file {}: {}", self.path.display(), e));
            AppError::StorageError(format!("Token file is not valid JSON: {}", e))
        })?;

        Ok(Some(TokenRecord::from_value(body)))
    }

    async fn save(&self, record: &TokenRecord) -> AppResult<()> {
        let bytes = serde_json::to_vec(record.as_value())?;
        tokio::fs::write(&self.path, bytes).await?;

        log_token_saved(&self.path.display().to_string());
        Ok(())
    }
}

/// In-process store, used by tests and for ephemeral deployments
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: RwLock<Option<TokenRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: TokenRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> AppResult<Option<TokenRecord>> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &TokenRecord) -> AppResult<()> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn google_response() -> Value {
        json!({
            "access_token": "ya29.a0AfH6SM",
            "expires_in": 3599,
            "refresh_token": "1//0gRefresh",
            "scope": "https://www.googleapis.com/auth/gmail.readonly",
            "token_type": "Bearer"
        })
    }

    #[test]
    fn test_token_record_accessors() {
        let record = TokenRecord::from_value(google_response());
        assert_eq!(record.access_token(), Some("ya29.a0AfH6SM"));
        assert_eq!(record.token_type(), Some("Bearer"));
        assert_eq!(record.refresh_token(), Some("1//0gRefresh"));
        assert_eq!(record.expires_in(), Some(3599));
        assert!(record.scope().unwrap().contains("gmail.readonly"));
    }

    #[test]
    fn test_token_record_without_access_token() {
        let record = TokenRecord::from_value(json!({"error": "invalid_grant"}));
        assert_eq!(record.access_token(), None);

        let empty = TokenRecord::from_value(json!({"access_token": ""}));
        assert_eq!(empty.access_token(), None);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("google_tokens.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_writes_body_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("google_tokens.json"));

        store.save(&TokenRecord::from_value(google_response())).await.unwrap();

        let on_disk: Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk, google_response());

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.as_value(), &google_response());
    }

    #[tokio::test]
    async fn test_file_store_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("google_tokens.json"));

        store.save(&TokenRecord::from_value(json!({"access_token": "first"}))).await.unwrap();
        store.save(&TokenRecord::from_value(json!({"access_token": "second"}))).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token(), Some("second"));
        assert_eq!(loaded.as_value(), &json!({"access_token": "second"}));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("google_tokens.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileCredentialStore::new(path);
        assert!(matches!(store.load().await, Err(AppError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().await.unwrap().is_none());

        store.save(&TokenRecord::from_value(google_response())).await.unwrap();
        assert_eq!(
            store.load().await.unwrap().unwrap().access_token(),
            Some("ya29.a0AfH6SM")
        );
    }
}
