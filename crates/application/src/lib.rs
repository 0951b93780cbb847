//! Gatekey Application - Session management
//!
//! This crate holds the stateful core of the session manager:
//! - The single-slot access credential store
//! - The session manager (login, refresh, logout, authenticated requests)
//! - The one-shot authorization-code callback exchange
//! - Port traits for the auth transport and persisted session storage

pub mod callback;
pub mod ports;
pub mod session;
pub mod token_store;

pub use callback::{CallbackExchange, CallbackOutcome, CallbackState};
pub use ports::{AuthTransport, SessionStorage, keys};
pub use session::{SessionManager, SessionQuery, SessionSnapshot};
pub use token_store::TokenStore;
