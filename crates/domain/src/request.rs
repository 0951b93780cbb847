//! Protected resource request and response types.

use serde::{Deserialize, Serialize};

/// HTTP methods supported for protected resource calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET request.
    #[default]
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
}

/// A request against a protected backend resource.
///
/// The path is relative to the configured base URL. The body, when present,
/// is sent as JSON, matching the backend contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Resource path, e.g. `/blogs`.
    pub path: String,
    /// Optional JSON body, already serialized.
    pub body: Option<String>,
}

impl ResourceRequest {
    /// Creates a GET request for the given path.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Creates a POST request carrying a JSON body.
    #[must_use]
    pub fn post_json(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body.into()),
        }
    }
}

/// Response from a protected resource call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl ResourceResponse {
    /// Creates a response from status and body.
    #[must_use]
    pub const fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true when the status signals a rejected credential.
    ///
    /// Covers 401, and 403 for deployments that surface expired tokens as
    /// forbidden. This is the trigger for the single refresh-and-retry.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}
