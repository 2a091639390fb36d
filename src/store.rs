// Task store implementation over SQLite

use crate::error::{StoreError, StoreResult};
use crate::models::{Task, TaskId};
use fs2::FileExt;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ordered task collection with per-call transactional durability.
///
/// All reads and writes go through this type. Every lookup and mutation is
/// keyed by stable task id, never by position in a fetched list. Mutations
/// take `&mut self`, so in-process callers are serialized by the borrow
/// checker; the store also holds an exclusive file lock for its lifetime,
/// so a second process opening the same directory gets [`StoreError::Busy`].
///
/// Multi-statement mutations run inside a single SQLite transaction. A
/// failed write commits nothing, so reads after a failure still see the
/// previous committed order and content.
pub struct TaskStore {
    base_path: PathBuf,
    db: Connection,
    _lock: File,
}

impl TaskStore {
    /// Open or create a store in the given directory.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let base_path = path.as_ref().to_path_buf();

        // Create directory if it doesn't exist
        fs::create_dir_all(&base_path)?;

        let lock = acquire_lock(&base_path)?;

        let db_path = base_path.join("tasklist.db");
        let db = Connection::open(&db_path)?;

        let store = Self {
            base_path,
            db,
            _lock: lock,
        };

        store.create_schema()?;

        Ok(store)
    }

    /// Get the base path of this store
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get a reference to the SQLite database connection
    pub fn db(&self) -> &Connection {
        &self.db
    }

    /// Create database schema
    fn create_schema(&self) -> StoreResult<()> {
        debug!("Creating database schema");

        // Order lives in an explicit position column so it survives
        // independent of row enumeration order. Positions stay dense
        // (0..count) after every committed mutation.
        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id         TEXT PRIMARY KEY,
                title      TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                done       INTEGER NOT NULL DEFAULT 0,
                position   INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_position ON tasks(position);
            "#,
        )?;

        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// All tasks in committed order.
    pub fn load_all(&self) -> StoreResult<Vec<Task>> {
        let mut stmt = self
            .db
            .prepare("SELECT id, title, created_at, done FROM tasks ORDER BY position ASC")?;

        let rows = stmt.query_map([], task_from_row)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }

        Ok(tasks)
    }

    /// Look up a single task by id.
    pub fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let task = self
            .db
            .query_row(
                "SELECT id, title, created_at, done FROM tasks WHERE id = ?1",
                [id.to_string()],
                task_from_row,
            )
            .optional()?;

        Ok(task)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a task with a fresh id and append it at the end of the list.
    pub fn add(&mut self, title: &str) -> StoreResult<Task> {
        validate_title(title)?;

        let task = Task::new(title);

        let tx = self.db.transaction()?;
        let position: i64 = tx.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        tx.execute(
            "INSERT INTO tasks (id, title, created_at, done, position)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                task.id.to_string(),
                task.title,
                task.created_at,
                task.done,
                position
            ],
        )?;
        tx.commit()?;

        debug!(id = %task.id, position, "Added task");
        Ok(task)
    }

    /// Change a task's title.
    pub fn rename(&mut self, id: TaskId, new_title: &str) -> StoreResult<()> {
        validate_title(new_title)?;

        let changed = self.db.execute(
            "UPDATE tasks SET title = ?2 WHERE id = ?1",
            rusqlite::params![id.to_string(), new_title],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        debug!(%id, "Renamed task");
        Ok(())
    }

    /// Flip a task's completion flag.
    pub fn toggle_done(&mut self, id: TaskId) -> StoreResult<()> {
        let changed = self.db.execute(
            "UPDATE tasks SET done = NOT done WHERE id = ?1",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        debug!(%id, "Toggled task");
        Ok(())
    }

    /// Remove a task and close the gap it leaves in the order.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<()> {
        let tx = self.db.transaction()?;
        let position = position_of(&tx, id)?;
        tx.execute("DELETE FROM tasks WHERE id = ?1", [id.to_string()])?;
        tx.execute(
            "UPDATE tasks SET position = position - 1 WHERE position > ?1",
            [position],
        )?;
        tx.commit()?;

        debug!(%id, "Deleted task");
        Ok(())
    }

    /// Relocate a task to `to_index`, clamped to `[0, count - 1]`.
    pub fn move_to(&mut self, id: TaskId, to_index: usize) -> StoreResult<()> {
        let tx = self.db.transaction()?;
        let from = position_of(&tx, id)?;
        let count: i64 = tx.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        let to = (to_index as i64).min(count - 1);

        if to != from {
            if to < from {
                tx.execute(
                    "UPDATE tasks SET position = position + 1
                     WHERE position >= ?1 AND position < ?2",
                    rusqlite::params![to, from],
                )?;
            } else {
                tx.execute(
                    "UPDATE tasks SET position = position - 1
                     WHERE position > ?1 AND position <= ?2",
                    rusqlite::params![from, to],
                )?;
            }
            tx.execute(
                "UPDATE tasks SET position = ?2 WHERE id = ?1",
                rusqlite::params![id.to_string(), to],
            )?;
        }
        tx.commit()?;

        debug!(%id, from, to, "Moved task");
        Ok(())
    }

    /// Replace the whole collection atomically, e.g. when restoring a backup.
    ///
    /// The incoming order becomes the committed order. Titles are validated
    /// and ids must be unique; nothing is written if any task is rejected.
    pub fn replace_all(&mut self, tasks: &[Task]) -> StoreResult<()> {
        let mut seen = HashSet::new();
        for task in tasks {
            validate_title(&task.title)?;
            if !seen.insert(task.id) {
                return Err(StoreError::Validation(format!(
                    "duplicate task id {}",
                    task.id
                )));
            }
        }

        let tx = self.db.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        for (position, task) in tasks.iter().enumerate() {
            tx.execute(
                "INSERT INTO tasks (id, title, created_at, done, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    task.id.to_string(),
                    task.title,
                    task.created_at,
                    task.done,
                    position as i64
                ],
            )?;
        }
        tx.commit()?;

        info!(count = tasks.len(), "Replaced task collection");
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let id_text: String = row.get(0)?;
    let id = id_text.parse::<TaskId>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Task {
        id,
        title: row.get(1)?,
        created_at: row.get(2)?,
        done: row.get(3)?,
    })
}

fn position_of(tx: &Transaction<'_>, id: TaskId) -> StoreResult<i64> {
    tx.query_row(
        "SELECT position FROM tasks WHERE id = ?1",
        [id.to_string()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or(StoreError::NotFound(id))
}

fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation(
            "title cannot be empty or whitespace-only".to_string(),
        ));
    }
    Ok(())
}

fn acquire_lock(base_path: &Path) -> StoreResult<File> {
    let lock_path = base_path.join(".lock");
    let lock = File::create(&lock_path)?;

    match lock.try_lock_exclusive() {
        Ok(()) => Ok(lock),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => Err(StoreError::Busy),
        Err(e) => Err(StoreError::Io(e)),
    }
}
