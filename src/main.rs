use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, bail};
use std::path::PathBuf;
use tasklist::{Config, StoreError, Task, TaskId, TaskStore, jsonl};
use tracing::warn;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Ordered to-do list backed by a local SQLite store")]
#[command(version)]
struct Cli {
    /// Store directory (default: config file, then the platform data dir)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task at the end of the list
    Add { title: String },

    /// Show the list in order
    List,

    /// Change a task's title
    Rename { id: String, title: String },

    /// Toggle a task's completion flag
    Done { id: String },

    /// Delete a task
    Rm { id: String },

    /// Move a task to a new place in the list (0-based)
    Move { id: String, to_index: usize },

    /// Write the list to a JSONL backup file
    Export { file: PathBuf },

    /// Replace the list with the contents of a JSONL backup file
    Import { file: PathBuf },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let store_dir = cli.store_path.unwrap_or_else(|| config.store_dir());

    // An unreadable store degrades to an empty listing instead of crashing;
    // every other command needs the store and reports the failure.
    let mut store = match TaskStore::open(&store_dir) {
        Ok(store) => store,
        Err(err @ (StoreError::Storage(_) | StoreError::Io(_)))
            if matches!(cli.command, Commands::List) =>
        {
            warn!(error = %err, "Store is unreadable, showing an empty list");
            println!("No tasks.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    match cli.command {
        Commands::Add { title } => {
            let task = store.add(&title)?;
            println!("Added {} ({})", task.title, short_id(&task).cyan());
        }
        Commands::List => {
            print_list(&store.load_all()?);
        }
        Commands::Rename { id, title } => {
            let id = resolve_id(&store, &id)?;
            store.rename(id, &title)?;
            println!("Renamed to {}", title);
        }
        Commands::Done { id } => {
            let id = resolve_id(&store, &id)?;
            store.toggle_done(id)?;
            if let Some(task) = store.get(id)? {
                let state = if task.done { "done" } else { "not done" };
                println!("{} is now {}", task.title, state);
            }
        }
        Commands::Rm { id } => {
            let id = resolve_id(&store, &id)?;
            store.delete(id)?;
            println!("Deleted");
        }
        Commands::Move { id, to_index } => {
            let id = resolve_id(&store, &id)?;
            store.move_to(id, to_index)?;
            print_list(&store.load_all()?);
        }
        Commands::Export { file } => {
            let tasks = store.load_all()?;
            jsonl::write_tasks(&file, &tasks)?;
            println!("Exported {} tasks to {}", tasks.len(), file.display());
        }
        Commands::Import { file } => {
            let tasks = jsonl::read_tasks(&file)?;
            store.replace_all(&tasks)?;
            println!("Imported {} tasks", tasks.len());
        }
    }

    Ok(())
}

fn print_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }

    for (index, task) in tasks.iter().enumerate() {
        let marker = if task.done { "[x]" } else { "[ ]" };
        let title = if task.done {
            task.title.strikethrough().dimmed()
        } else {
            task.title.normal()
        };
        println!(
            "{:>3}  {}  {}  {}  {}",
            index,
            marker,
            title,
            format_date(task.created_at).dimmed(),
            short_id(task).cyan(),
        );
    }
}

/// Resolve a full id or an unambiguous id prefix against the current list.
///
/// Prefix matching is a presentation-layer convenience; the store itself
/// only ever sees full ids.
fn resolve_id(store: &TaskStore, input: &str) -> Result<TaskId> {
    if let Ok(id) = input.parse::<TaskId>() {
        return Ok(id);
    }

    let tasks = store.load_all()?;
    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.id.to_string().starts_with(input))
        .collect();

    match matches.as_slice() {
        [task] => Ok(task.id),
        [] => bail!("No task matches id '{}'", input),
        _ => bail!("Id '{}' is ambiguous ({} matches)", input, matches.len()),
    }
}

fn short_id(task: &Task) -> String {
    task.id.to_string()[..8].to_string()
}

fn format_date(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}
