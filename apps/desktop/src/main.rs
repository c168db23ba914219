use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, ActionOutcome, TodoListController};
use shared::domain::{Task, TaskId};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Manage the shared todo list from the terminal")]
struct Args {
    /// Todo collection URL, e.g. http://localhost:5000/api/todos
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Print every task
    List,
    /// Add a task
    Add { text: Vec<String> },
    /// Replace the text of a task
    Edit { id: String, text: Vec<String> },
    /// Flip a task between open and done
    Toggle { id: String },
    /// Remove a task
    Delete { id: String },
}

fn format_task_line(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!("[{mark}] {}  ({})", task.text, task.id)
}

fn describe(outcome: &ActionOutcome, command: &Command) -> Result<()> {
    match outcome {
        ActionOutcome::Applied => Ok(()),
        ActionOutcome::Stale => {
            println!("Task was already gone; nothing changed locally.");
            Ok(())
        }
        ActionOutcome::Skipped => match command {
            Command::Add { .. } => bail!("task text must not be blank"),
            Command::Edit { id, .. } => bail!("no task with id {id}, or the new text is blank"),
            Command::Toggle { id } | Command::Delete { id } => bail!("no task with id {id}"),
            Command::List => Ok(()),
        },
        ActionOutcome::Failed(err) => bail!("{err}"),
    }
}

/// `RUST_LOG` when it parses, `info` otherwise.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

async fn run(controller: &TodoListController, command: &Command) -> ActionOutcome {
    match command {
        Command::List => ActionOutcome::Applied,
        Command::Add { text } => controller.create(&text.join(" ")).await,
        Command::Edit { id, text } => {
            let id = TaskId::from(id.as_str());
            if controller.begin_edit(&id).await.is_applied() {
                controller.submit_edit(&text.join(" ")).await
            } else {
                ActionOutcome::Skipped
            }
        }
        Command::Toggle { id } => controller.toggle_complete(&TaskId::from(id.as_str())).await,
        Command::Delete { id } => controller.delete(&TaskId::from(id.as_str())).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let command = args.command.unwrap_or(Command::List);

    let controller = TodoListController::with_settings(&settings)?;
    if let ActionOutcome::Failed(err) = controller.load().await {
        bail!("could not load tasks: {err}");
    }

    let outcome = run(&controller, &command).await;
    match &outcome {
        ActionOutcome::Failed(err) => error!(?command, "action failed: {err}"),
        outcome => info!(?command, ?outcome, "action finished"),
    }

    let snapshot = controller.snapshot().await;
    if snapshot.tasks.is_empty() {
        println!("No tasks yet.");
    }
    for task in &snapshot.tasks {
        println!("{}", format_task_line(task));
    }

    describe(&outcome, &command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{RemoteCallError, RemoteOperation};

    #[test]
    fn marks_completed_tasks() {
        assert_eq!(
            format_task_line(&Task::new("1", "buy milk", true)),
            "[x] buy milk  (1)"
        );
        assert_eq!(
            format_task_line(&Task::new("2", "wash car", false)),
            "[ ] wash car  (2)"
        );
    }

    #[test]
    fn parses_multi_word_add() {
        let args = Args::try_parse_from(["todo", "add", "wash", "the", "car"]).expect("parse");
        assert_eq!(
            args.command,
            Some(Command::Add {
                text: vec!["wash".into(), "the".into(), "car".into()]
            })
        );
    }

    #[test]
    fn defaults_to_listing() {
        let args = Args::try_parse_from(["todo", "--api-url", "http://h/api/todos"]).expect("parse");
        assert_eq!(args.command, None);
        assert_eq!(args.api_url.as_deref(), Some("http://h/api/todos"));
    }

    #[test]
    fn log_filter_defaults_to_info_and_honours_rust_log() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn failures_and_unknown_ids_become_errors() {
        let failed = ActionOutcome::Failed(RemoteCallError::new(RemoteOperation::Delete, "boom"));
        let delete = Command::Delete { id: "9".into() };

        assert!(describe(&failed, &delete).is_err());
        assert!(describe(&ActionOutcome::Skipped, &delete).is_err());
        assert!(describe(&ActionOutcome::Stale, &delete).is_ok());
        assert!(describe(&ActionOutcome::Applied, &Command::List).is_ok());
    }
}
