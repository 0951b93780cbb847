//! In-memory access credential storage.
//!
//! A single process-wide slot for the current access credential. Writes are
//! not arbitrated: the slot is last-write-wins, and duplicate concurrent
//! refreshes each install an independently valid credential.

use std::sync::Arc;

use gatekey_domain::AccessCredential;
use tokio::sync::RwLock;

/// Single-slot store for the current access credential.
///
/// Clones share the same slot. No expiry is tracked here; staleness is
/// discovered reactively when an authorized call is rejected.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    slot: Arc<RwLock<Option<AccessCredential>>>,
}

impl TokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current credential.
    pub async fn set(&self, credential: AccessCredential) {
        let mut slot = self.slot.write().await;
        *slot = Some(credential);
    }

    /// Returns the current credential, if any.
    pub async fn get(&self) -> Option<AccessCredential> {
        self.slot.read().await.clone()
    }

    /// Removes the current credential.
    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }

    /// Returns true if a credential is present.
    pub async fn is_present(&self) -> bool {
        self.slot.read().await.is_some()
    }
}
