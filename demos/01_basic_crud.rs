//! Example 01: Basic CRUD Operations
//!
//! This example demonstrates the fundamental create, read, update, and delete
//! operations with the task store.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use tasklist::TaskStore;

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().to_path_buf();

    println!("Task List Basic CRUD Example");
    println!("============================\n");
    println!("Store path: {}\n", store_path.display());

    // Open (or create) the store
    let mut store = TaskStore::open(&store_path)?;
    println!("Store opened successfully.\n");

    // CREATE: Add a few tasks
    println!("1. CREATE - Adding tasks...");
    let milk = store.add("Buy milk")?;
    let plants = store.add("Water the plants")?;
    println!("   Added '{}' with id {}", milk.title, milk.id);
    println!("   Added '{}' with id {}\n", plants.title, plants.id);

    // READ: Retrieve a task by id
    println!("2. READ - Retrieving a task...");
    match store.get(milk.id)? {
        Some(task) => {
            println!("   Found task:");
            println!("   - Title: {}", task.title);
            println!("   - Done: {}", task.done);
        }
        None => println!("   Task not found!"),
    }
    println!();

    // UPDATE: Rename and complete
    println!("3. UPDATE - Renaming and completing...");
    store.rename(milk.id, "Buy oat milk")?;
    store.toggle_done(milk.id)?;
    let renamed = store.get(milk.id)?.expect("task exists");
    println!("   Now '{}', done = {}\n", renamed.title, renamed.done);

    // LIST: Show the whole list in order
    println!("4. LIST - Showing all tasks...");
    for task in store.load_all()? {
        let marker = if task.done { "x" } else { " " };
        println!("   [{}] {}", marker, task.title);
    }
    println!();

    // DELETE: Remove a task
    println!("5. DELETE - Removing a task...");
    store.delete(plants.id)?;
    println!("   Remaining tasks: {}\n", store.load_all()?.len());

    println!("Example complete!");
    Ok(())
}
