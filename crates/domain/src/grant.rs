//! Token endpoint response payloads.

use serde::{Deserialize, Serialize};

use crate::credential::AccessCredential;

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Response of the password login and refresh endpoints.
///
/// Cookie-flow deployments omit `refresh_token` from the body and carry the
/// refresh credential in an httpOnly cookie instead; stored-token flows
/// return it here and may rotate it on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// The new access token.
    pub access_token: String,
    /// Token type, usually "bearer".
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Rotated refresh token, when the flow carries it in the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenGrant {
    /// Converts the grant into the access credential it carries.
    #[must_use]
    pub fn credential(&self) -> AccessCredential {
        AccessCredential::with_token_type(&self.access_token, &self.token_type)
    }
}

/// Denormalized user snapshot returned alongside tokens.
///
/// Cached for display only; never authoritative. The credential, not the
/// profile, decides whether a session exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable subject identifier.
    pub sub: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Response of the authorization-code exchange endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeGrant {
    /// The new access token.
    pub access_token: String,
    /// OpenID Connect identity token.
    pub id_token: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

impl ExchangeGrant {
    /// Converts the grant into the access credential it carries.
    #[must_use]
    pub fn credential(&self) -> AccessCredential {
        AccessCredential::new(&self.access_token)
    }
}
