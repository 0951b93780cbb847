//! Access credential type.

use serde::{Deserialize, Serialize};

/// Short-lived bearer credential authorizing individual API calls.
///
/// The token is opaque to the client; its expiry is not known locally and is
/// only discovered when an authorized call is rejected. The credential lives
/// until it is explicitly cleared or replaced by a login, refresh, or code
/// exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredential {
    /// The opaque token string.
    token: String,
    /// Token type, usually "Bearer".
    token_type: String,
}

impl AccessCredential {
    /// Creates a bearer credential from an opaque token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: "Bearer".to_string(),
        }
    }

    /// Creates a credential with an explicit token type.
    ///
    /// Token endpoints commonly report the type in lowercase ("bearer");
    /// the header value is normalized to the canonical capitalization.
    #[must_use]
    pub fn with_token_type(token: impl Into<String>, token_type: &str) -> Self {
        let token_type = if token_type.eq_ignore_ascii_case("bearer") {
            "Bearer".to_string()
        } else {
            token_type.to_string()
        };
        Self {
            token: token.into(),
            token_type,
        }
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the `Authorization` header value for this credential.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_authorization_header() {
        let credential = AccessCredential::new("abc");
        assert_eq!(credential.authorization_header(), "Bearer abc");
    }

    #[test]
    fn test_lowercase_token_type_normalized() {
        let credential = AccessCredential::with_token_type("abc", "bearer");
        assert_eq!(credential.authorization_header(), "Bearer abc");
    }

    #[test]
    fn test_custom_token_type_preserved() {
        let credential = AccessCredential::with_token_type("abc", "DPoP");
        assert_eq!(credential.authorization_header(), "DPoP abc");
    }
}
