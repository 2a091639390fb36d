// JSONL backup of the task collection

use crate::models::Task;
use eyre::{Context, Result, bail};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{info, warn};

/// Write the collection to a JSONL file, one task per line, in list order.
pub fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut file = File::create(path).context("Failed to create backup file")?;

    for task in tasks {
        let json = serde_json::to_string(task)?;
        writeln!(file, "{}", json)?;
    }
    file.sync_all()?; // Ensure data is flushed to disk

    Ok(())
}

/// Read a task collection back from a JSONL file, preserving line order.
///
/// Blank and malformed lines are skipped with a warning. A duplicated task
/// id is an error, since ids must stay unique within a list.
pub fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    let file = File::open(path).context("Failed to open backup file")?;
    let reader = BufReader::new(file);

    let mut tasks = Vec::new();
    let mut seen = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to read line, skipping"
                );
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let task: Task = match serde_json::from_str(&line) {
            Ok(t) => t,
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to parse JSON, skipping"
                );
                continue;
            }
        };

        if !seen.insert(task.id) {
            bail!("Duplicate task id {} at line {}", task.id, line_num + 1);
        }
        tasks.push(task);
    }

    info!(file = ?path, count = tasks.len(), "Loaded tasks from backup");

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_preserves_order_and_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("backup.jsonl");

        let tasks = vec![Task::new("first"), Task::new("second"), Task::new("third")];
        write_tasks(&path, &tasks).unwrap();

        let loaded = read_tasks(&path).unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_read_skips_malformed_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("backup.jsonl");

        let task = Task::new("valid");
        let mut content = serde_json::to_string(&task).unwrap();
        content.push_str("\n{malformed json}\n\n");
        fs::write(&path, content).unwrap();

        let loaded = read_tasks(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, task.id);
    }

    #[test]
    fn test_read_rejects_duplicate_ids() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("backup.jsonl");

        let task = Task::new("twice");
        let line = serde_json::to_string(&task).unwrap();
        fs::write(&path, format!("{}\n{}\n", line, line)).unwrap();

        assert!(read_tasks(&path).is_err());
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.jsonl");

        assert!(read_tasks(&path).is_err());
    }
}
