//! Auth transport implementation using reqwest.
//!
//! Implements the backend HTTP contract: form-encoded password login, JSON
//! refresh and code exchange, cookie-carried logout, and bearer-attached
//! resource calls. The client keeps a cookie store so httpOnly refresh
//! cookies set by the token endpoint travel automatically.

use async_trait::async_trait;
use gatekey_domain::{
    AccessCredential, AuthError, AuthResult, ExchangeGrant, HttpMethod, ResourceRequest,
    ResourceResponse, TokenGrant,
};
use reqwest::{Client, Method, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gatekey_application::AuthTransport;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// OAuth2-style error body returned by the auth endpoints.
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl AuthErrorBody {
    /// Picks the most descriptive field, mirroring what the backend puts
    /// first: description, then message, then the error identifier.
    fn best_message(body: &str) -> String {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|parsed| {
                parsed
                    .error_description
                    .or(parsed.message)
                    .or(parsed.error)
            })
            .unwrap_or_else(|| body.to_string())
    }
}

#[derive(Debug, Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
struct ExchangeBody<'a> {
    code: &'a str,
    redirect_uri: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Reqwest-backed implementation of the [`AuthTransport`] port.
pub struct HttpAuthTransport {
    client: Client,
    base_url: Url,
}

impl HttpAuthTransport {
    /// Creates a transport for the given backend base URL.
    ///
    /// The client carries a cookie store and does not follow redirects, so
    /// authorization-server redirects surface to the caller instead of
    /// being chased with credentials attached.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the URL is invalid or the client
    /// cannot be constructed.
    pub fn new(base_url: &str) -> AuthResult<Self> {
        let client = Client::builder()
            .user_agent("Gatekey/0.1.0")
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(AuthError::transport)?;
        Self::with_client(client, base_url)
    }

    /// Creates a transport over a caller-supplied client.
    ///
    /// The client should have a cookie store enabled when the deployment
    /// carries the refresh credential in a cookie.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the base URL is invalid.
    pub fn with_client(client: Client, base_url: &str) -> AuthResult<Self> {
        let base_url = Url::parse(base_url).map_err(AuthError::transport)?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> AuthResult<Url> {
        self.base_url.join(path).map_err(AuthError::transport)
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    async fn read_grant(response: reqwest::Response) -> AuthResult<TokenGrant> {
        response.json().await.map_err(|e| AuthError::Transport {
            message: format!("failed to parse token response: {e}"),
        })
    }
}

#[async_trait]
impl AuthTransport for HttpAuthTransport {
    async fn login(&self, username: &str, password: &str) -> AuthResult<TokenGrant> {
        let body = serde_urlencoded::to_string([("username", username), ("password", password)])
            .map_err(AuthError::transport)?;

        let response = self
            .client
            .post(self.endpoint("/auth/token")?)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(AuthError::transport)?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::InvalidCredentials {
                message: AuthErrorBody::best_message(&text),
            });
        }
        Self::read_grant(response).await
    }

    async fn register(&self, username: &str, password: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.endpoint("/auth/")?)
            .json(&RegisterBody { username, password })
            .send()
            .await
            .map_err(AuthError::transport)?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::InvalidCredentials {
                message: AuthErrorBody::best_message(&text),
            });
        }
        Ok(())
    }

    async fn refresh(&self, refresh_token: Option<&str>) -> AuthResult<TokenGrant> {
        let builder = self.client.post(self.endpoint("/auth/refresh")?);
        // Cookie flow sends an empty POST; the jar presents the credential.
        let builder = match refresh_token {
            Some(refresh_token) => builder.json(&RefreshBody { refresh_token }),
            None => builder,
        };

        let response = builder.send().await.map_err(AuthError::transport)?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::RefreshFailed {
                message: AuthErrorBody::best_message(&text),
            });
        }
        Self::read_grant(response).await
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AuthResult<ExchangeGrant> {
        let response = self
            .client
            .post(self.endpoint("/auth/callback")?)
            .json(&ExchangeBody { code, redirect_uri })
            .send()
            .await
            .map_err(AuthError::transport)?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::ExchangeFailed {
                message: AuthErrorBody::best_message(&text),
            });
        }
        response.json().await.map_err(|e| AuthError::Transport {
            message: format!("failed to parse exchange response: {e}"),
        })
    }

    async fn logout(&self) -> AuthResult<()> {
        let response = self
            .client
            .post(self.endpoint("/auth/logout")?)
            .send()
            .await
            .map_err(AuthError::transport)?;

        if !response.status().is_success() {
            return Err(AuthError::Transport {
                message: format!("logout returned status {}", response.status()),
            });
        }
        Ok(())
    }

    async fn execute(
        &self,
        request: &ResourceRequest,
        credential: Option<&AccessCredential>,
    ) -> AuthResult<ResourceResponse> {
        let mut builder = self
            .client
            .request(
                Self::to_reqwest_method(request.method),
                self.endpoint(&request.path)?,
            )
            .header("Content-Type", "application/json");

        if let Some(credential) = credential {
            builder = builder.header("Authorization", credential.authorization_header());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(AuthError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(AuthError::transport)?;
        debug!(path = %request.path, status, "resource call completed");
        Ok(ResourceResponse::new(status, body))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_error_body_prefers_description() {
        let message = AuthErrorBody::best_message(
            r#"{"error": "invalid_grant", "error_description": "Code expired"}"#,
        );
        assert_eq!(message, "Code expired");
    }

    #[test]
    fn test_error_body_falls_back_to_error() {
        let message = AuthErrorBody::best_message(r#"{"error": "invalid_grant"}"#);
        assert_eq!(message, "invalid_grant");
    }

    #[test]
    fn test_error_body_falls_back_to_raw_text() {
        let message = AuthErrorBody::best_message("Internal Server Error");
        assert_eq!(message, "Internal Server Error");
    }

    #[test]
    fn test_endpoint_join() {
        let transport = HttpAuthTransport::new("http://localhost:8000").expect("transport");
        let url = transport.endpoint("/blogs").expect("url");
        assert_eq!(url.as_str(), "http://localhost:8000/blogs");
    }
}
