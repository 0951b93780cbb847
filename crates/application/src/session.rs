//! Session manager: login, refresh, logout, and authenticated requests.

use std::sync::Arc;

use gatekey_domain::{
    AuthError, AuthResult, RefreshFlow, ResourceRequest, ResourceResponse, SessionConfig,
    TokenGrant, UserProfile,
};
use tracing::{debug, warn};

use crate::ports::{AuthTransport, SessionStorage, keys};
use crate::token_store::TokenStore;

/// The client's session with the backend.
///
/// Owns the access credential slot and drives every flow that may mutate
/// it: password login, signup, refresh, logout, and the wrapped resource
/// request that performs the single refresh-and-retry on authorization
/// failure. Clones share the same credential slot and collaborators.
pub struct SessionManager<T, S> {
    transport: Arc<T>,
    storage: Arc<S>,
    tokens: TokenStore,
    config: SessionConfig,
}

impl<T, S> Clone for SessionManager<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            storage: Arc::clone(&self.storage),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T, S> SessionManager<T, S>
where
    T: AuthTransport,
    S: SessionStorage,
{
    /// Creates a session manager over the given transport and storage.
    #[must_use]
    pub fn new(config: SessionConfig, transport: Arc<T>, storage: Arc<S>) -> Self {
        Self {
            transport,
            storage,
            tokens: TokenStore::new(),
            config,
        }
    }

    /// Returns the credential store shared by this session.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns a read-only view of this session for view components.
    #[must_use]
    pub fn query(&self) -> SessionQuery<S> {
        SessionQuery {
            tokens: self.tokens.clone(),
            storage: Arc::clone(&self.storage),
        }
    }

    /// Logs in with username and password.
    ///
    /// On success the new access credential replaces the current one, and
    /// for stored-token flows the refresh token is persisted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the server rejects the login; the
    /// caller shows it inline and does not retry.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<()> {
        let grant = self.transport.login(username, password).await?;
        self.install_grant(&grant).await?;
        debug!("login succeeded");
        Ok(())
    }

    /// Registers a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the server rejects the signup.
    pub async fn register(&self, username: &str, password: &str) -> AuthResult<()> {
        self.transport.register(username, password).await
    }

    /// Redeems the refresh credential for a new access credential.
    ///
    /// Invoked at most once per triggering event (page load, or an
    /// authorization failure inside [`Self::request`]). There is no retry
    /// or backoff here.
    ///
    /// # Errors
    ///
    /// Returns `RefreshFailed` when the session cannot be renewed; the
    /// caller must treat that as logged-out.
    pub async fn refresh(&self) -> AuthResult<()> {
        let stored = match self.config.refresh_flow {
            RefreshFlow::Cookie => None,
            RefreshFlow::StoredToken => {
                let token = self.storage.get(keys::REFRESH_TOKEN).await?;
                match token {
                    Some(token) => Some(token),
                    None => {
                        return Err(AuthError::RefreshFailed {
                            message: "no refresh credential present".to_string(),
                        });
                    }
                }
            }
        };

        let grant = self.transport.refresh(stored.as_deref()).await?;
        self.install_grant(&grant).await?;
        debug!("session refreshed");
        Ok(())
    }

    /// Logs out: terminates the server session (best-effort), then clears
    /// the credential slot and every persisted key together.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisted state cannot be cleared. A
    /// failed logout request is logged and ignored; local state is cleared
    /// regardless.
    pub async fn logout(&self) -> AuthResult<()> {
        if let Err(error) = self.transport.logout().await {
            warn!(%error, "logout request failed; clearing local session anyway");
        }
        self.tokens.clear().await;
        self.storage.clear().await?;
        debug!("session cleared");
        Ok(())
    }

    /// Executes a protected resource request.
    ///
    /// 1. With an empty credential slot, attempts one silent refresh first;
    ///    its failure is swallowed so the request can fail naturally with
    ///    an authorization status instead of short-circuiting.
    /// 2. Sends the request with the current credential attached.
    /// 3. On an unauthorized response, performs exactly one refresh and one
    ///    retry with the new credential.
    ///
    /// Concurrent calls do not share an in-flight refresh; each may trigger
    /// its own. Duplicate refreshes are wasteful but safe: every one
    /// installs an independently valid credential, last write wins.
    ///
    /// # Errors
    ///
    /// Returns `SessionExpired` when the retry is also unauthorized or the
    /// refresh itself fails. Transport failures propagate unchanged.
    pub async fn request(&self, request: &ResourceRequest) -> AuthResult<ResourceResponse> {
        if !self.tokens.is_present().await {
            // Covers "page reload, cookie still valid" without blocking the
            // normal 401 path when it is not.
            if let Err(error) = self.refresh().await {
                debug!(%error, "silent refresh failed; proceeding unauthenticated");
            }
        }

        let credential = self.tokens.get().await;
        let response = self.transport.execute(request, credential.as_ref()).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        debug!(path = %request.path, status = response.status, "authorization failed, refreshing once");
        self.refresh().await.map_err(|error| {
            warn!(%error, "refresh after authorization failure did not succeed");
            AuthError::SessionExpired
        })?;

        let credential = self.tokens.get().await;
        let retry = self.transport.execute(request, credential.as_ref()).await?;
        if retry.is_unauthorized() {
            return Err(AuthError::SessionExpired);
        }
        Ok(retry)
    }

    /// Installs a token grant: credential into the slot, rotated refresh
    /// token into storage when the flow carries one in the body.
    async fn install_grant(&self, grant: &TokenGrant) -> AuthResult<()> {
        self.tokens.set(grant.credential()).await;
        if self.config.refresh_flow == RefreshFlow::StoredToken
            && let Some(refresh_token) = &grant.refresh_token
        {
            self.storage.put(keys::REFRESH_TOKEN, refresh_token).await?;
        }
        Ok(())
    }
}

/// Read-only view of the session state for view components.
///
/// Holds no transport, so it cannot initiate network calls; it answers "is
/// a session currently active" from the credential slot and persisted
/// storage alone. A present-but-expired credential still reports
/// authenticated here: staleness is only discovered when a real request is
/// attempted.
pub struct SessionQuery<S> {
    tokens: TokenStore,
    storage: Arc<S>,
}

impl<S> Clone for SessionQuery<S> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            storage: Arc::clone(&self.storage),
        }
    }
}

/// Snapshot of the session for rendering decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// True when an access credential is currently present.
    pub authenticated: bool,
    /// Cached user profile, when one was persisted.
    pub profile: Option<UserProfile>,
}

impl<S> SessionQuery<S>
where
    S: SessionStorage,
{
    /// Returns true when an access credential is present.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.is_present().await
    }

    /// Returns the cached profile, if one was persisted.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisted state cannot be read.
    pub async fn profile(&self) -> AuthResult<Option<UserProfile>> {
        let Some(raw) = self.storage.get(keys::USER).await? else {
            return Ok(None);
        };
        let profile = serde_json::from_str(&raw).map_err(AuthError::storage)?;
        Ok(Some(profile))
    }

    /// Returns the authenticated flag and cached profile together.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisted state cannot be read.
    pub async fn snapshot(&self) -> AuthResult<SessionSnapshot> {
        Ok(SessionSnapshot {
            authenticated: self.is_authenticated().await,
            profile: self.profile().await?,
        })
    }
}
