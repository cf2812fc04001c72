//! Project commands

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::DEFAULT_PROJECT_NAME;
use crate::storage::Workspace;
use crate::store::Store;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Add a project
    Add {
        /// Project name
        name: String,
    },

    /// List projects with their task counts
    List,

    /// Delete a project, moving its tasks to 'uncategorised'
    Delete {
        /// Project id (see 'tick project list')
        id: u64,
    },
}

pub fn run(cmd: ProjectCommands, output: &Output) -> Result<()> {
    match cmd {
        ProjectCommands::Add { name } => add(output, &name),
        ProjectCommands::List => list(output),
        ProjectCommands::Delete { id } => delete(output, id),
    }
}

fn add(output: &Output, name: &str) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (mut store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    if name.trim().is_empty() {
        bail!("Project name cannot be empty");
    }
    if store.project_by_name(name).is_some() {
        bail!("A project named '{}' already exists", name);
    }

    let project = store.add_project(name)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "id": project.id, "name": project.name }));
    } else {
        output.success(&format!("Added project {}: {}", project.id, project.name));
    }

    Ok(())
}

fn list(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    if output.is_json() {
        let items: Vec<_> = store
            .projects()
            .iter()
            .map(|project| {
                serde_json::json!({
                    "id": project.id,
                    "name": project.name,
                    "tasks": task_count(&store, &project.name),
                })
            })
            .collect();
        output.data(&items);
    } else {
        println!("{:<5} {:<24} TASKS", "ID", "NAME");
        println!("{}", "-".repeat(40));

        for project in store.projects() {
            println!(
                "{:<5} {:<24} {}",
                project.id,
                project.name,
                task_count(&store, &project.name)
            );
        }
    }

    Ok(())
}

fn delete(output: &Output, id: u64) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (mut store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    // The default project must stay available as a reassignment target
    if id == 1 {
        bail!("The '{}' project cannot be deleted", DEFAULT_PROJECT_NAME);
    }

    let name = match store.project(id) {
        Some(project) => project.name.clone(),
        None => bail!("Project not found: {}", id),
    };
    let moved = task_count(&store, &name);

    store.delete_project(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "deleted": true,
            "tasks_moved": moved,
        }));
    } else if moved > 0 {
        output.success(&format!(
            "Deleted project '{}' ({} task(s) moved to '{}')",
            name, moved, DEFAULT_PROJECT_NAME
        ));
    } else {
        output.success(&format!("Deleted project '{}'", name));
    }

    Ok(())
}

fn task_count(store: &Store, project: &str) -> usize {
    store
        .tasks()
        .iter()
        .filter(|task| task.project == project)
        .count()
}
