//! Port traits for external dependencies.

mod storage;
mod transport;

pub use storage::{SessionStorage, keys};
pub use transport::AuthTransport;
