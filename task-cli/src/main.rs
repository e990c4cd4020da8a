use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{LevelFilter, debug, warn};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use task_cli::task::parse_id;
use task_cli::{Config, Status, TaskError, TaskRepository, storage};

/// Track tasks in a local JSON file
#[derive(Parser, Debug)]
#[command(name = "task-cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a new task
    Add { description: String },
    /// Update a task's description
    Update {
        #[arg(allow_hyphen_values = true)]
        id: String,
        description: String,
    },
    /// Delete a task
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Mark a task as in-progress
    MarkInProgress {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Mark a task as done
    MarkDone {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// List all tasks, or only those with the given status
    List { status: Option<String> },
}

fn init_logging() -> anyhow::Result<()> {
    // stdout carries command output, so logs go to stderr
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .logger(Logger::builder().build("task_cli", LevelFilter::Info))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .map_err(|err| anyhow::anyhow!("invalid logging configuration: {err}"))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging()?;
    debug!("Action: {:?}", args.command);

    let config = Config::new().context("cannot load configuration")?;
    let path = config.store.path();
    let mut tasks = storage::load(path).context("cannot load tasks")?;

    let outcome = match args.command {
        Commands::List { status } => {
            print_tasks(&tasks, status.as_deref());
            return Ok(());
        }
        Commands::Add { description } => tasks
            .add(description)
            .map(|id| println!("Task added successfully (ID: {})", id)),
        Commands::Update { id, description } => update(&mut tasks, &id, description),
        Commands::Delete { id } => delete(&mut tasks, &id),
        Commands::MarkInProgress { id } => mark(&mut tasks, &id, Status::InProgress),
        Commands::MarkDone { id } => mark(&mut tasks, &id, Status::Done),
    };

    // Not fatal; the unchanged store is still written back.
    if let Err(err) = outcome {
        warn!("{}", err);
    }
    storage::save(&tasks, path).context("cannot save tasks")?;

    Ok(())
}

fn update(tasks: &mut TaskRepository, id: &str, description: String) -> Result<(), TaskError> {
    let task = tasks.update(parse_id(id)?, description)?;
    println!("Task {} updated", task.id());
    Ok(())
}

fn delete(tasks: &mut TaskRepository, id: &str) -> Result<(), TaskError> {
    let task = tasks.delete(parse_id(id)?)?;
    println!("Task {} deleted", task.id());
    Ok(())
}

fn mark(tasks: &mut TaskRepository, id: &str, status: Status) -> Result<(), TaskError> {
    let task = tasks.set_status(parse_id(id)?, status)?;
    println!("Task {} marked as {}", task.id(), task.status());
    Ok(())
}

fn print_tasks(tasks: &TaskRepository, status: Option<&str>) {
    let listed: Vec<_> = match status {
        Some(status) => tasks.list_by_status(status).collect(),
        None => tasks.list_all().collect(),
    };

    if listed.is_empty() {
        println!("No tasks found");
        return;
    }
    for task in listed {
        println!("{}", task);
    }
}
