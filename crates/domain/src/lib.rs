//! Gatekey Domain - Core session types
//!
//! This crate defines the domain model for the Gatekey session manager.
//! All types here are pure Rust with no I/O dependencies.

pub mod callback;
pub mod config;
pub mod credential;
pub mod error;
pub mod grant;
pub mod request;

pub use callback::CallbackParams;
pub use config::{RefreshFlow, SessionConfig};
pub use credential::AccessCredential;
pub use error::{AuthError, AuthResult};
pub use grant::{ExchangeGrant, TokenGrant, UserProfile};
pub use request::{HttpMethod, ResourceRequest, ResourceResponse};
