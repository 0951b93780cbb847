//! Storage adapters.

mod file;

pub use file::FileSessionStorage;
