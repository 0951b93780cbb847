//! Auth transport port.

use async_trait::async_trait;
use gatekey_domain::{
    AccessCredential, AuthResult, ExchangeGrant, ResourceRequest, ResourceResponse, TokenGrant,
};

/// Port for the backend auth and resource endpoints.
///
/// This trait abstracts the HTTP layer so the session logic can be driven
/// by scripted fakes in tests. Implementations own the cookie jar: when the
/// refresh credential travels as an httpOnly cookie, it is carried by the
/// transport automatically and never passes through this interface.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// Exchanges username and password for a token grant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the server rejects the login, or a
    /// transport error on network failure.
    async fn login(&self, username: &str, password: &str) -> AuthResult<TokenGrant>;

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the server rejects the signup.
    async fn register(&self, username: &str, password: &str) -> AuthResult<()>;

    /// Redeems the refresh credential for a new token grant.
    ///
    /// `refresh_token` is `Some` for stored-token flows and `None` for
    /// cookie flows, where the transport's cookie jar presents the
    /// credential.
    ///
    /// # Errors
    ///
    /// Returns `RefreshFailed` on any non-success status; the caller treats
    /// that as a terminated session.
    async fn refresh(&self, refresh_token: Option<&str>) -> AuthResult<TokenGrant>;

    /// Exchanges a single-use authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeFailed` when the server rejects the code. Callers
    /// must not retry: the code is consumed by the first attempt.
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AuthResult<ExchangeGrant>;

    /// Terminates the server-side session.
    ///
    /// # Errors
    ///
    /// Returns a transport error on failure; callers treat logout as
    /// best-effort and clear local state regardless.
    async fn logout(&self) -> AuthResult<()>;

    /// Executes a resource request, attaching the credential as a bearer
    /// header when present.
    ///
    /// Authorization rejections are returned as ordinary responses (401 or
    /// 403 status), not as errors; the retry decision belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns a transport error on network failure.
    async fn execute(
        &self,
        request: &ResourceRequest,
        credential: Option<&AccessCredential>,
    ) -> AuthResult<ResourceResponse>;
}
