// Error taxonomy for store operations

use crate::models::TaskId;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by [`TaskStore`](crate::TaskStore) operations.
///
/// A mutation that fails leaves the committed collection unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected input, e.g. an empty title.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No task with the given id.
    #[error("no task with id {0}")]
    NotFound(TaskId),

    /// The database read or write failed.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Filesystem failure around the database or lockfile.
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Another process holds the store lock.
    #[error("store is locked by another process")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_display_includes_id() {
        let id = Uuid::now_v7();
        let err = StoreError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_validation_display() {
        let err = StoreError::Validation("title cannot be empty".to_string());
        assert_eq!(err.to_string(), "invalid input: title cannot be empty");
    }
}
