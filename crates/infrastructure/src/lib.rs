//! Gatekey Infrastructure - Transport and storage adapters
//!
//! Implements the application ports against real backends: a reqwest-based
//! auth transport with a cookie jar for cookie-carried refresh credentials,
//! and a file-backed session storage.

pub mod storage;
pub mod transport;

pub use storage::FileSessionStorage;
pub use transport::HttpAuthTransport;
