//! Example 02: Manual Reordering
//!
//! This example demonstrates user-significant ordering: tasks keep the
//! position they were dragged to, including across a store reopen.
//!
//! Run with: cargo run --example 02_reorder

use eyre::Result;
use tasklist::TaskStore;

fn print_list(store: &TaskStore) -> Result<()> {
    for (index, task) in store.load_all()?.iter().enumerate() {
        println!("   {}: {}", index, task.title);
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().to_path_buf();

    println!("Task List Reorder Example");
    println!("=========================\n");

    let mut store = TaskStore::open(&store_path)?;
    store.add("Pack bags")?;
    store.add("Book flights")?;
    let passport = store.add("Renew passport")?;

    println!("Initial order:");
    print_list(&store)?;

    // The passport comes first, everything else shifts down one slot
    println!("After moving '{}' to the front:", passport.title);
    store.move_to(passport.id, 0)?;
    print_list(&store)?;

    // Out-of-range targets clamp to the end of the list
    println!("After moving it to index 99 (clamped to last):");
    store.move_to(passport.id, 99)?;
    print_list(&store)?;

    // Order survives a restart
    drop(store);
    let store = TaskStore::open(&store_path)?;
    println!("After reopening the store:");
    print_list(&store)?;

    println!("Example complete!");
    Ok(())
}
