//! NexusBoard CLI - Command line client for the board service.

use clap::{Parser, Subcommand};
use reqwest::Client;
use serde::Deserialize;

use nexusboard_core::{BoardStats, Project, Status, Task};

/// NexusBoard CLI - board management tool
#[derive(Parser)]
#[command(name = "nexusboard")]
#[command(about = "CLI for the NexusBoard board service", long_about = None)]
struct Cli {
    /// Server address
    #[arg(short, long, default_value = "http://127.0.0.1:8420")]
    addr: String,

    /// Acting role sent as the x-role header
    #[arg(short, long, default_value = "editor")]
    role: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects
    #[command(name = "list-projects")]
    ListProjects,

    /// List a project's board, column by column
    #[command(name = "list-tasks")]
    ListTasks {
        /// Project ID
        project: String,
    },

    /// Quick-add a task to a column
    Add {
        /// Project ID
        project: String,

        /// Card title
        title: String,

        /// Target column
        #[arg(short, long, default_value = "todo")]
        column: String,
    },

    /// Move a task to a column, optionally next to a sibling
    Move {
        /// Task ID
        id: String,

        /// Target column
        column: String,

        /// Drop before this sibling task
        #[arg(long, conflicts_with = "after")]
        before: Option<String>,

        /// Drop after this sibling task
        #[arg(long)]
        after: Option<String>,
    },

    /// Delete a task (admin role required)
    Delete {
        /// Task ID
        id: String,
    },

    /// Show board statistics for a project
    Stats {
        /// Project ID
        project: String,
    },
}

/// Task plus fired automation rule, as returned by save/move.
#[derive(Deserialize)]
struct AutomatedTask {
    task: Task,
    rule: Option<String>,
}

/// One board column.
#[derive(Deserialize)]
struct Column {
    label: String,
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct Board {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct Stats {
    #[serde(flatten)]
    stats: BoardStats,
    stalled: Vec<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let ctx = Context {
        client,
        addr: cli.addr,
        role: cli.role,
    };

    match cli.command {
        Commands::ListProjects => list_projects(&ctx).await?,
        Commands::ListTasks { project } => list_tasks(&ctx, &project).await?,
        Commands::Add {
            project,
            title,
            column,
        } => add_task(&ctx, &project, &title, &column).await?,
        Commands::Move {
            id,
            column,
            before,
            after,
        } => move_task(&ctx, &id, &column, before, after).await?,
        Commands::Delete { id } => delete_task(&ctx, &id).await?,
        Commands::Stats { project } => stats(&ctx, &project).await?,
    }

    Ok(())
}

struct Context {
    client: Client,
    addr: String,
    role: String,
}

impl Context {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

async fn list_projects(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let projects: Vec<Project> = ctx
        .client
        .get(ctx.url("/v1/projects"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("Projects ({}):", projects.len());
    println!("{:<36}  {:<24}  {:<12}  {}", "ID", "NAME", "OWNER", "SHARED WITH");
    println!("{}", "-".repeat(90));
    for project in projects {
        println!(
            "{:<36}  {:<24}  {:<12}  {}",
            project.id,
            project.name,
            project.owner,
            project.shared_with.join(", ")
        );
    }

    Ok(())
}

async fn list_tasks(ctx: &Context, project: &str) -> Result<(), Box<dyn std::error::Error>> {
    let board: Board = ctx
        .client
        .get(ctx.url(&format!("/v1/projects/{project}/tasks")))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    for column in board.columns {
        println!("{} ({}):", column.label, column.tasks.len());
        for task in column.tasks {
            println!(
                "  {:<36}  {:>3}%  {:<8}  {}",
                task.id, task.progress, task.priority, task.title
            );
        }
    }

    Ok(())
}

async fn add_task(
    ctx: &Context,
    project: &str,
    title: &str,
    column: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let status: Status = column.parse()?;
    let response = ctx
        .client
        .post(ctx.url("/v1/tasks"))
        .header("x-role", &ctx.role)
        .json(&serde_json::json!({
            "project_id": project,
            "title": title,
            "status": status,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let err: ApiError = response.json().await?;
        return Err(err.error.into());
    }

    let task: Task = response.json().await?;
    println!("Task created:");
    print_task(&task);

    Ok(())
}

async fn move_task(
    ctx: &Context,
    id: &str,
    column: &str,
    before: Option<String>,
    after: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let status: Status = column.parse()?;
    let (anchor, side) = match (before, after) {
        (Some(anchor), _) => (Some(anchor), Some("before")),
        (None, Some(anchor)) => (Some(anchor), Some("after")),
        (None, None) => (None, None),
    };

    let response = ctx
        .client
        .post(ctx.url(&format!("/v1/tasks/{id}/move")))
        .header("x-role", &ctx.role)
        .json(&serde_json::json!({
            "status": status,
            "anchor": anchor,
            "side": side,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let err: ApiError = response.json().await?;
        return Err(err.error.into());
    }

    let moved: AutomatedTask = response.json().await?;
    println!("Task moved:");
    print_task(&moved.task);
    if let Some(rule) = moved.rule {
        println!("  Automation: {rule}");
    }

    Ok(())
}

async fn delete_task(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let response = ctx
        .client
        .delete(ctx.url(&format!("/v1/tasks/{id}")))
        .header("x-role", &ctx.role)
        .send()
        .await?;

    if !response.status().is_success() {
        let err: ApiError = response.json().await?;
        return Err(err.error.into());
    }

    println!("Task {id} deleted");
    Ok(())
}

async fn stats(ctx: &Context, project: &str) -> Result<(), Box<dyn std::error::Error>> {
    let stats: Stats = ctx
        .client
        .get(ctx.url(&format!("/v1/projects/{project}/stats")))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("Tasks:       {}", stats.stats.total);
    for (status, count) in Status::ALL.iter().zip(stats.stats.by_status) {
        println!("  {:<12} {}", status.label(), count);
    }
    println!("Completion:  {}%", stats.stats.completion_rate);
    println!("Velocity:    {}%", stats.stats.velocity);
    if !stats.stalled.is_empty() {
        println!("Stalled:     {}", stats.stalled.join(", "));
    }

    Ok(())
}

fn print_task(task: &Task) {
    println!("  ID:         {}", task.id);
    println!("  Title:      {}", task.title);
    println!("  Status:     {}", task.status.label());
    println!("  Progress:   {}%", task.progress);
    if let Some(position) = task.position {
        println!("  Position:   {position}");
    }
    if !task.checklist.is_empty() {
        println!("  Checklist:");
        for item in &task.checklist {
            let mark = if item.checked { "x" } else { " " };
            println!("    [{mark}] {}", item.text);
        }
    }
}
