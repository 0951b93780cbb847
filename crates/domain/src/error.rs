//! Session error taxonomy.

use thiserror::Error;

/// Errors surfaced by the session manager and its collaborators.
///
/// Propagation policy: every failure is typed and returned to the immediate
/// caller; no component retries beyond the single documented
/// refresh-and-retry step in the authenticated request path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login or signup rejected by the server. Shown inline, never retried.
    #[error("invalid credentials: {message}")]
    InvalidCredentials {
        /// Server-supplied rejection detail.
        message: String,
    },

    /// The session could not be renewed. The caller must treat this as
    /// logged-out, not as a transient error.
    #[error("failed to refresh session: {message}")]
    RefreshFailed {
        /// Error description.
        message: String,
    },

    /// An authorized call failed even after one refresh and retry.
    #[error("authentication session expired")]
    SessionExpired,

    /// The authorization server returned an error via the redirect URL.
    /// Displayed verbatim with a recovery action.
    #[error("authorization server error: {error}: {description}")]
    ProviderError {
        /// Provider error identifier.
        error: String,
        /// Provider error description, or a placeholder when absent.
        description: String,
    },

    /// The code exchange was rejected. Never retried: the code is already
    /// consumed and a second exchange cannot succeed.
    #[error("code exchange failed: {message}")]
    ExchangeFailed {
        /// Error description.
        message: String,
    },

    /// A network or parse failure below the protocol level.
    #[error("transport error: {message}")]
    Transport {
        /// Error description.
        message: String,
    },

    /// Persisted session storage failed.
    #[error("storage error: {message}")]
    Storage {
        /// Error description.
        message: String,
    },
}

impl AuthError {
    /// Creates a transport error from any displayable source.
    pub fn transport(source: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: source.to_string(),
        }
    }

    /// Creates a storage error from any displayable source.
    pub fn storage(source: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: source.to_string(),
        }
    }
}

/// Result type alias for session operations.
pub type AuthResult<T> = Result<T, AuthError>;
