// tasklist - Ordered to-do list with a SQLite-backed store

pub mod config;
pub mod error;
pub mod jsonl;
pub mod models;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use models::{Task, TaskId, now_ms};
pub use store::TaskStore;

// Re-export rusqlite for embedders
pub use rusqlite;
