//! Persisted session storage port.

use async_trait::async_trait;
use gatekey_domain::AuthResult;

/// Fixed keys for persisted session state.
///
/// All keys are cleared together on logout.
pub mod keys {
    /// Cached access token.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Refresh token, for stored-token flows.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// OpenID Connect identity token.
    pub const ID_TOKEN: &str = "id_token";
    /// Serialized user profile, for display only.
    pub const USER: &str = "user";
}

/// Port for persisted client-side session state.
///
/// Holds string values under the fixed keys of [`keys`]. Single-writer
/// assumed; last write wins.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read.
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be written.
    async fn put(&self, key: &str, value: &str) -> AuthResult<()>;

    /// Removes a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be written.
    async fn remove(&self, key: &str) -> AuthResult<()>;

    /// Removes every stored key.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be written.
    async fn clear(&self) -> AuthResult<()>;
}
