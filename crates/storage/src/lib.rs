#![forbid(unsafe_code)]

pub mod browser;
pub mod kv;
pub mod repository;

pub use browser::LocalStorage;
pub use kv::{InMemoryStore, KeyValueStore};
pub use repository::{CompletionRepository, CompletionStore, StorageError};
