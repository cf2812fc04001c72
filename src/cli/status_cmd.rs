//! Workspace status overview

use anyhow::Result;
use chrono::Local;

use super::output::Output;
use crate::storage::Workspace;
use crate::store::Store;

/// Show workspace status overview
pub fn run(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    let today = Local::now().date_naive();
    let tasks = store.tasks();

    let total = tasks.len();
    let done = tasks.iter().filter(|t| t.complete).count();
    let open = total - done;
    let due_today = tasks
        .iter()
        .filter(|t| !t.complete && t.due == today)
        .count();
    let overdue = tasks
        .iter()
        .filter(|t| !t.complete && t.due < today)
        .count();

    if output.is_json() {
        let projects: Vec<_> = store
            .projects()
            .iter()
            .map(|project| {
                serde_json::json!({
                    "id": project.id,
                    "name": project.name,
                    "tasks": tasks.iter().filter(|t| t.project == project.name).count(),
                })
            })
            .collect();

        output.data(&serde_json::json!({
            "tasks": {
                "total": total,
                "open": open,
                "done": done,
                "due_today": due_today,
                "overdue": overdue,
            },
            "projects": projects,
        }));
    } else {
        println!("Workspace Status");
        println!("{}", "=".repeat(40));
        println!();
        println!("Tasks: {} total", total);
        println!("  [ ] Open:  {}", open);
        println!("  [x] Done:  {}", done);
        println!();
        println!("  Due today: {}", due_today);
        println!("  Overdue:   {}", overdue);
        println!();
        println!("Projects: {} total", store.projects().len());
        for project in store.projects() {
            let count = tasks.iter().filter(|t| t.project == project.name).count();
            println!("  {:<24} {} task(s)", project.name, count);
        }
    }

    Ok(())
}
