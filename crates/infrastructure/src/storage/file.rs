//! File-based session storage.
//!
//! Persists the fixed session keys as a single JSON object, the file-backed
//! equivalent of the browser's local storage. Logout removes the whole file
//! so every key disappears together.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use gatekey_domain::{AuthError, AuthResult};
use tokio::fs;

use gatekey_application::SessionStorage;

/// Session storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates a storage at the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> AuthResult<HashMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(data) => serde_json::from_str(&data).map_err(AuthError::storage),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AuthError::storage(e)),
        }
    }

    async fn save(&self, values: &HashMap<String, String>) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(AuthError::storage)?;
        }
        let data = serde_json::to_string_pretty(values).map_err(AuthError::storage)?;
        fs::write(&self.path, &data).await.map_err(AuthError::storage)?;

        // Tokens live in this file; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(AuthError::storage)?;
        }

        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> AuthResult<()> {
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> AuthResult<()> {
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.save(&values).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> AuthResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::storage(e)),
        }
    }
}
