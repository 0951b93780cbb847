//! Session configuration.

use serde::{Deserialize, Serialize};

/// How the refresh credential travels, decided once at startup.
///
/// Some deployments keep the refresh credential in an httpOnly cookie the
/// transport sends automatically; others return it in the token response
/// body and the client holds it in persisted storage. Configuring the
/// variant here avoids branching on response-field presence at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshFlow {
    /// Refresh credential is an httpOnly cookie; opaque to the client.
    #[default]
    Cookie,
    /// Refresh credential is a token string held in persisted storage.
    StoredToken,
}

/// Static configuration for a Gatekey session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Redirect URI registered with the authorization server. Must match
    /// the one used during authorization or the code exchange is rejected.
    pub redirect_uri: String,
    /// Route to land on after a successful code exchange.
    #[serde(default = "default_post_login_route")]
    pub post_login_route: String,
    /// Route to fall back to when the callback carries no parameters.
    #[serde(default = "default_home_route")]
    pub home_route: String,
    /// How the refresh credential travels.
    #[serde(default)]
    pub refresh_flow: RefreshFlow,
}

fn default_post_login_route() -> String {
    "/".to_string()
}

fn default_home_route() -> String {
    "/".to_string()
}

impl SessionConfig {
    /// Creates a configuration with default routes and cookie refresh flow.
    #[must_use]
    pub fn new(base_url: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            redirect_uri: redirect_uri.into(),
            post_login_route: default_post_login_route(),
            home_route: default_home_route(),
            refresh_flow: RefreshFlow::default(),
        }
    }

    /// Sets the post-login destination route.
    #[must_use]
    pub fn with_post_login_route(mut self, route: impl Into<String>) -> Self {
        self.post_login_route = route.into();
        self
    }

    /// Sets the refresh flow variant.
    #[must_use]
    pub const fn with_refresh_flow(mut self, flow: RefreshFlow) -> Self {
        self.refresh_flow = flow;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new("http://localhost:8000", "http://localhost:8000/auth");
        assert_eq!(config.post_login_route, "/");
        assert_eq!(config.home_route, "/");
        assert_eq!(config.refresh_flow, RefreshFlow::Cookie);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: SessionConfig = serde_json::from_str(
            r#"{
                "base_url": "http://localhost:8000",
                "redirect_uri": "http://localhost:8000/auth",
                "refresh_flow": "stored_token"
            }"#,
        )
        .expect("valid config");
        assert_eq!(config.refresh_flow, RefreshFlow::StoredToken);
        assert_eq!(config.home_route, "/");
    }
}
