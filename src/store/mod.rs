//! # Task and Project Store
//!
//! The store owns the in-memory task and project collections, persists
//! them through an injected [`StorageAdapter`] and notifies registered
//! observers after every successful write.
//!
//! ## Side-effect contract
//!
//! Every mutating operation writes the full affected collection first and
//! invokes the matching observers second, so subscribers only ever see
//! state that has already been persisted. Failed lookups return a typed
//! error and produce neither a write nor a notification.
//!
//! ## Validation
//!
//! The store performs none. Callers are expected to have checked titles,
//! dates and project names before handing over a draft; the store accepts
//! whatever it is given and keeps the collections consistent.

use chrono::Local;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{FilterKey, Project, Task, TaskDraft, DEFAULT_PROJECT_NAME};
use crate::storage::{StorageAdapter, StorageError, Workspace};

/// Storage key for the task collection
pub const TASKS_KEY: &str = "tasks";

/// Storage key for the project collection
pub const PROJECTS_KEY: &str = "projects";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    #[error("Project not found: {0}")]
    ProjectNotFound(u64),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Observer invoked with the task payload of a change
pub type TaskObserver = Box<dyn FnMut(&[Task])>;

/// Observer invoked with the project payload of a change
pub type ProjectObserver = Box<dyn FnMut(&[Project])>;

/// Issues encountered while loading persisted state
///
/// Hydration never fails outright. Anything unreadable is replaced by
/// the default state and recorded here for the caller to surface.
#[derive(Debug, Default)]
pub struct HydrationReport {
    issues: Vec<String>,
}

impl HydrationReport {
    /// Returns the issues found during hydration
    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

/// Application state plus its persistence and notification plumbing
pub struct Store {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    storage: Box<dyn StorageAdapter>,
    task_observers: Vec<TaskObserver>,
    project_observers: Vec<ProjectObserver>,
}

impl Store {
    /// Opens a store, hydrating state from the given adapter
    pub fn open(storage: Box<dyn StorageAdapter>) -> (Self, HydrationReport) {
        let mut report = HydrationReport::default();

        let tasks = hydrate(storage.as_ref(), TASKS_KEY, Vec::new, &mut report);
        let projects = hydrate(
            storage.as_ref(),
            PROJECTS_KEY,
            || vec![Project::uncategorised()],
            &mut report,
        );

        let store = Self {
            tasks,
            projects,
            storage,
            task_observers: Vec::new(),
            project_observers: Vec::new(),
        };

        (store, report)
    }

    /// Opens the store backed by a workspace's file storage
    pub fn for_workspace(workspace: &Workspace) -> (Self, HydrationReport) {
        Self::open(Box::new(workspace.storage()))
    }

    /// Registers an observer for task changes
    pub fn on_task_change(&mut self, observer: impl FnMut(&[Task]) + 'static) {
        self.task_observers.push(Box::new(observer));
    }

    /// Registers an observer for project changes
    pub fn on_project_change(&mut self, observer: impl FnMut(&[Project]) + 'static) {
        self.project_observers.push(Box::new(observer));
    }

    /// Returns all tasks in collection order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns all projects in collection order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a task by id
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Looks up a project by id
    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Looks up a project by name
    pub fn project_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Adds a task from a draft, assigning the next free id
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = Task::new(self.next_task_id(), draft);
        self.tasks.push(task.clone());
        self.persist_tasks()?;
        self.notify_tasks();
        Ok(task)
    }

    /// Replaces the editable fields of a task, keeping id and completion
    pub fn edit_task(&mut self, id: u64, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.apply(draft);
        let edited = task.clone();
        self.persist_tasks()?;
        self.notify_tasks();
        Ok(edited)
    }

    /// Removes a task
    pub fn delete_task(&mut self, id: u64) -> Result<Task, StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        let removed = self.tasks.remove(index);
        self.persist_tasks()?;
        self.notify_tasks();
        Ok(removed)
    }

    /// Flips a task's completion and re-sorts the collection
    ///
    /// Incomplete tasks come first; order within each half is preserved.
    pub fn toggle_complete(&mut self, id: u64) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.complete = !task.complete;
        let toggled = task.clone();

        self.tasks.sort_by_key(|t| t.complete);
        self.persist_tasks()?;
        self.notify_tasks();
        Ok(toggled)
    }

    /// Adds a project, assigning the next free id
    ///
    /// Name uniqueness is the caller's concern; the interface checks it
    /// before offering the action.
    pub fn add_project(&mut self, name: impl Into<String>) -> Result<Project, StoreError> {
        let project = Project {
            id: self.next_project_id(),
            name: name.into(),
        };
        self.projects.push(project.clone());
        self.persist_projects()?;
        self.notify_projects();
        Ok(project)
    }

    /// Removes a project, moving its tasks to the default project
    ///
    /// Tasks are reassigned by name, persisted and announced first; then
    /// the shrunk project list is persisted and announced; finally the
    /// full task list is re-announced through [`FilterKey::All`]. Nothing
    /// stops the default project itself from being deleted here; the
    /// interface simply never offers it.
    pub fn delete_project(&mut self, id: u64) -> Result<Project, StoreError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))?;

        let name = self.projects[index].name.clone();
        for task in &mut self.tasks {
            if task.project == name {
                task.project = DEFAULT_PROJECT_NAME.to_string();
            }
        }
        self.persist_tasks()?;
        self.notify_tasks();

        let removed = self.projects.remove(index);
        self.persist_projects()?;
        self.notify_projects();

        self.filter(&FilterKey::All);

        Ok(removed)
    }

    /// Returns the tasks matching a filter, incomplete first
    ///
    /// A derived view: nothing is mutated or persisted, but task
    /// observers are notified with the selection so the interface renders
    /// what the filter produced.
    pub fn filter(&mut self, key: &FilterKey) -> Vec<Task> {
        let today = Local::now().date_naive();
        let mut selection: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| key.matches(t, today))
            .cloned()
            .collect();
        selection.sort_by_key(|t| t.complete);

        for observer in &mut self.task_observers {
            observer(&selection);
        }

        selection
    }

    fn next_task_id(&self) -> u64 {
        self.tasks
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    fn next_project_id(&self) -> u64 {
        self.projects
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    fn persist_tasks(&self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.tasks)?;
        self.storage.save(TASKS_KEY, &encoded)?;
        Ok(())
    }

    fn persist_projects(&self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.projects)?;
        self.storage.save(PROJECTS_KEY, &encoded)?;
        Ok(())
    }

    fn notify_tasks(&mut self) {
        for observer in &mut self.task_observers {
            observer(&self.tasks);
        }
    }

    fn notify_projects(&mut self) {
        for observer in &mut self.project_observers {
            observer(&self.projects);
        }
    }
}

fn hydrate<T: DeserializeOwned>(
    storage: &dyn StorageAdapter,
    key: &str,
    default: impl FnOnce() -> T,
    report: &mut HydrationReport,
) -> T {
    match storage.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                report
                    .issues
                    .push(format!("Discarding unreadable '{}' data: {}", key, e));
                default()
            }
        },
        Ok(None) => default(),
        Err(e) => {
            report.issues.push(format!("Could not load '{}': {}", key, e));
            default()
        }
    }
}
