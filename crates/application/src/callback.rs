//! One-shot authorization-code callback exchange.
//!
//! Converts the code delivered via redirect URL into tokens, exactly once
//! per navigation. Rendering frameworks may invoke the triggering lifecycle
//! event more than once for the same navigation; the second invocation must
//! not resend the single-use code, or the losing request would show the
//! user a failure even though the first exchange succeeded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gatekey_domain::{AuthError, CallbackParams, SessionConfig, UserProfile};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::ports::{AuthTransport, SessionStorage, keys};
use crate::token_store::TokenStore;

/// States of the callback exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallbackState {
    /// Nothing handled yet.
    #[default]
    Idle,
    /// Inspecting the redirect URL parameters.
    Checking,
    /// Code exchange request in flight.
    Exchanging,
    /// Finished, successfully or with nothing to do.
    Done,
    /// Provider error or failed exchange; never retried.
    Errored {
        /// Message for inline display.
        message: String,
    },
}

/// Result of handling one redirect navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The latch was already taken: another invocation for this navigation
    /// is handling (or has handled) the exchange. No request was sent.
    AlreadyHandled,
    /// No code and no error in the URL; navigate back to the entry route.
    RedirectHome {
        /// Route to navigate to.
        route: String,
    },
    /// Exchange succeeded; tokens are installed and the profile persisted.
    LoggedIn {
        /// Route to navigate to.
        destination: String,
        /// Profile returned by the exchange.
        profile: UserProfile,
    },
    /// Provider error or rejected exchange.
    Failed {
        /// Message for inline display, with a manual recovery action.
        message: String,
    },
}

/// One-shot state machine for a single redirect navigation.
///
/// Construct a fresh instance per navigation. The transition out of `Idle`
/// is guarded by a latch that is checked and set synchronously, before any
/// asynchronous work begins, so duplicate invocations of the same trigger
/// cannot both reach the exchange request.
pub struct CallbackExchange<T, S> {
    transport: Arc<T>,
    storage: Arc<S>,
    tokens: TokenStore,
    config: SessionConfig,
    latch: AtomicBool,
    state: RwLock<CallbackState>,
}

impl<T, S> CallbackExchange<T, S>
where
    T: AuthTransport,
    S: SessionStorage,
{
    /// Creates an exchange for one redirect navigation.
    #[must_use]
    pub fn new(
        config: SessionConfig,
        transport: Arc<T>,
        storage: Arc<S>,
        tokens: TokenStore,
    ) -> Self {
        Self {
            transport,
            storage,
            tokens,
            config,
            latch: AtomicBool::new(false),
            state: RwLock::new(CallbackState::Idle),
        }
    }

    /// Returns the current state.
    pub async fn state(&self) -> CallbackState {
        self.state.read().await.clone()
    }

    /// Handles the redirect URL for this navigation.
    ///
    /// Idempotent under duplicate invocation: only the first caller takes
    /// the latch and runs the machine; later callers get
    /// [`CallbackOutcome::AlreadyHandled`] without any network traffic.
    pub async fn handle(&self, url: &Url) -> CallbackOutcome {
        // Checked-and-set before the first await. A latch taken after any
        // suspension point would leave a window for a duplicate trigger to
        // send the single-use code a second time.
        if self.latch.swap(true, Ordering::SeqCst) {
            debug!("duplicate callback invocation ignored");
            return CallbackOutcome::AlreadyHandled;
        }

        self.set_state(CallbackState::Checking).await;
        let params = CallbackParams::from_url(url);

        if let Some(error) = params.error {
            let description = params
                .error_description
                .unwrap_or_else(|| "no description".to_string());
            let failure = AuthError::ProviderError { error, description };
            warn!(%failure, "authorization server returned an error");
            return self.fail(failure.to_string()).await;
        }

        let Some(code) = params.code else {
            // Direct navigation to the callback route; nothing to redeem.
            debug!("no authorization code in callback URL, redirecting home");
            self.set_state(CallbackState::Done).await;
            return CallbackOutcome::RedirectHome {
                route: self.config.home_route.clone(),
            };
        };

        self.set_state(CallbackState::Exchanging).await;
        let grant = match self
            .transport
            .exchange_code(&code, &self.config.redirect_uri)
            .await
        {
            Ok(grant) => grant,
            Err(error) => {
                warn!(%error, "code exchange rejected");
                return self.fail(error.to_string()).await;
            }
        };

        self.tokens.set(grant.credential()).await;
        if let Err(error) = self.persist(&grant.access_token, &grant.id_token, &grant.user).await {
            warn!(%error, "failed to persist session state");
            return self.fail(error.to_string()).await;
        }

        debug!("code exchange completed");
        self.set_state(CallbackState::Done).await;
        CallbackOutcome::LoggedIn {
            destination: self.config.post_login_route.clone(),
            profile: grant.user,
        }
    }

    async fn persist(
        &self,
        access_token: &str,
        id_token: &str,
        user: &UserProfile,
    ) -> Result<(), AuthError> {
        let profile = serde_json::to_string(user).map_err(AuthError::storage)?;
        self.storage.put(keys::ACCESS_TOKEN, access_token).await?;
        self.storage.put(keys::ID_TOKEN, id_token).await?;
        self.storage.put(keys::USER, &profile).await?;
        Ok(())
    }

    async fn fail(&self, message: String) -> CallbackOutcome {
        self.set_state(CallbackState::Errored {
            message: message.clone(),
        })
        .await;
        CallbackOutcome::Failed { message }
    }

    async fn set_state(&self, next: CallbackState) {
        let mut state = self.state.write().await;
        *state = next;
    }
}
