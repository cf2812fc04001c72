//! Task commands
//!
//! Validation lives here, not in the store: empty titles, past due dates
//! and unknown project names are rejected before a draft is handed over.

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::Args;

use super::output::Output;
use crate::domain::{FilterKey, Priority, Task, TaskDraft};
use crate::storage::Workspace;
use crate::store::Store;

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long, short)]
    pub due: NaiveDate,

    /// Longer description
    #[arg(long)]
    pub desc: Option<String>,

    /// Priority (high, medium or low)
    #[arg(long, short)]
    pub priority: Option<Priority>,

    /// Project the task belongs to
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: u64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(long, short)]
    pub due: Option<NaiveDate>,

    /// New description (pass an empty string to reset it)
    #[arg(long)]
    pub desc: Option<String>,

    /// New priority (high, medium or low)
    #[arg(long, short)]
    pub priority: Option<Priority>,

    /// New project
    #[arg(long)]
    pub project: Option<String>,
}

pub fn add(output: &Output, args: AddArgs) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (mut store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    if args.title.trim().is_empty() {
        bail!("Title cannot be empty");
    }
    if args.due < Local::now().date_naive() {
        bail!("Due date cannot be in the past");
    }

    let config = workspace.config();
    let project = args
        .project
        .unwrap_or_else(|| config.default_project.clone());
    require_project(&store, &project)?;

    let draft = TaskDraft {
        title: args.title,
        description: args.desc,
        due: args.due,
        priority: args.priority.unwrap_or(config.default_priority),
        project,
    };

    let task = store.add_task(draft)?;
    output.verbose_ctx("add", &format!("Assigned id {}", task.id));

    if output.is_json() {
        output.data(&task_json(&task));
    } else {
        output.success(&format!("Added task {}: {}", task.id, task.title));
    }

    Ok(())
}

pub fn edit(output: &Output, args: EditArgs) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (mut store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    let current = match store.task(args.id) {
        Some(task) => task.clone(),
        None => bail!("Task not found: {}", args.id),
    };

    if let Some(title) = &args.title {
        if title.trim().is_empty() {
            bail!("Title cannot be empty");
        }
    }
    if let Some(due) = args.due {
        if due < Local::now().date_naive() {
            bail!("Due date cannot be in the past");
        }
    }
    if let Some(project) = &args.project {
        require_project(&store, project)?;
    }

    let draft = TaskDraft {
        title: args.title.unwrap_or(current.title),
        description: Some(args.desc.unwrap_or(current.description)),
        due: args.due.unwrap_or(current.due),
        priority: args.priority.unwrap_or(current.priority),
        project: args.project.unwrap_or(current.project),
    };

    let task = store.edit_task(args.id, draft)?;

    if output.is_json() {
        output.data(&task_json(&task));
    } else {
        output.success(&format!("Updated task {}: {}", task.id, task.title));
    }

    Ok(())
}

pub fn done(output: &Output, id: u64) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (mut store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    let task = store.toggle_complete(id)?;

    if output.is_json() {
        output.data(&task_json(&task));
    } else if task.complete {
        output.success(&format!("Completed: {}", task.title));
    } else {
        output.success(&format!("Reopened: {}", task.title));
    }

    Ok(())
}

pub fn delete(output: &Output, id: u64) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (mut store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    let task = store.delete_task(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "id": id, "deleted": true }));
    } else {
        output.success(&format!("Deleted: {}", task.title));
    }

    Ok(())
}

pub fn show(output: &Output, id: u64) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    let task = match store.task(id) {
        Some(task) => task,
        None => bail!("Task not found: {}", id),
    };

    if output.is_json() {
        output.data(&task_json(task));
    } else {
        let today = Local::now().date_naive();

        println!("Task {}: {}", task.id, task.title);
        println!("Project:  {}", task.project);
        println!("Priority: {}", task.priority);
        if task.due < today && !task.complete {
            println!("Due:      {} (overdue)", task.due);
        } else {
            println!("Due:      {}", task.due);
        }
        println!("Status:   {}", if task.complete { "done" } else { "open" });
        println!();
        println!("{}", task.description);
    }

    Ok(())
}

pub fn list(output: &Output, filter: Option<&str>) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (mut store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    let token = filter
        .map(str::to_string)
        .unwrap_or_else(|| workspace.config().default_filter.clone());
    let key = FilterKey::parse(&token);

    output.verbose_ctx("list", &format!("Applying filter: {}", key));
    let tasks = store.filter(&key);

    if output.is_json() {
        let items: Vec<_> = tasks.iter().map(task_json).collect();
        output.data(&items);
    } else if tasks.is_empty() {
        if key == FilterKey::All {
            println!("No tasks yet");
        } else {
            println!("No tasks match '{}'", key);
        }
    } else {
        println!(
            "{:<5} {:<6} {:<12} {:<8} {:<32} PROJECT",
            "ID", "DONE", "DUE", "PRI", "TITLE"
        );
        println!("{}", "-".repeat(78));

        for task in &tasks {
            let indicator = if task.complete { "[x]" } else { "[ ]" };
            println!(
                "{:<5} {:<6} {:<12} {:<8} {:<32} {}",
                task.id,
                indicator,
                task.due.to_string(),
                task.priority.to_string(),
                task.title,
                task.project
            );
        }
    }

    Ok(())
}

fn require_project(store: &Store, name: &str) -> Result<()> {
    if store.project_by_name(name).is_none() {
        bail!("No project named '{}'", name);
    }
    Ok(())
}

fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "due": task.due.to_string(),
        "priority": task.priority.to_string(),
        "project": task.project,
        "complete": task.complete,
    })
}
