//! Interactive application state and key handling
//!
//! The store is the single source of truth: the app registers observers
//! that feed snapshots through channels, and the visible task list is
//! always the last payload the store announced.

use std::sync::mpsc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

use super::event::{Event, EventHandler};
use super::term::Terminal;
use super::ui;
use crate::domain::{FilterKey, Project, Task, TaskDraft, DEFAULT_PROJECT_NAME};
use crate::storage::WorkspaceConfig;
use crate::store::Store;

/// Which panel has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Sidebar,
    Tasks,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Sidebar => Pane::Tasks,
            Pane::Tasks => Pane::Sidebar,
        }
    }
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Confirm(ConfirmAction),
    NewTask(TaskForm),
}

/// Pending confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(u64),
    DeleteProject(u64),
}

/// Field focus within the new-task form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Due,
}

/// State of the new-task form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskForm {
    pub title: String,
    pub due: String,
    pub field: FormField,
    pub error: Option<String>,
}

/// One selectable sidebar row
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEntry {
    Filter(FilterKey),
    Project(Project),
}

/// Application state
pub struct App {
    store: Store,
    config: WorkspaceConfig,

    /// Last task payload the store announced
    visible: Vec<Task>,
    /// Last project payload the store announced
    projects: Vec<Project>,

    task_rx: mpsc::Receiver<Vec<Task>>,
    project_rx: mpsc::Receiver<Vec<Project>>,

    active: FilterKey,
    pane: Pane,
    mode: Mode,
    sidebar_index: usize,
    task_index: usize,
    message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates the application, subscribing to store notifications
    pub fn new(mut store: Store, config: WorkspaceConfig) -> Self {
        let (task_tx, task_rx) = mpsc::channel();
        store.on_task_change(move |tasks| {
            let _ = task_tx.send(tasks.to_vec());
        });

        let (project_tx, project_rx) = mpsc::channel();
        store.on_project_change(move |projects| {
            let _ = project_tx.send(projects.to_vec());
        });

        let projects = store.projects().to_vec();
        let active = FilterKey::parse(&config.default_filter);

        let mut app = Self {
            store,
            config,
            visible: Vec::new(),
            projects,
            task_rx,
            project_rx,
            active: active.clone(),
            pane: Pane::Sidebar,
            mode: Mode::Normal,
            sidebar_index: 0,
            task_index: 0,
            message: None,
            should_quit: false,
        };

        // Start the sidebar on the active filter when it is a built-in
        if let Some(position) = FilterKey::builtins().iter().position(|key| *key == active) {
            app.sidebar_index = position;
        }

        app.store.filter(&app.active);
        app.drain_notifications();
        app
    }

    /// Runs the main loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Tick => self.drain_notifications(),
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        ui::draw(frame, self);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits regardless of mode
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode.clone() {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Confirm(action) => self.handle_confirm_key(key, action),
            Mode::NewTask(form) => self.handle_form_key(key, form),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),

            KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Left
            | KeyCode::Right => {
                self.pane = self.pane.next();
            }

            KeyCode::Enter => {
                if self.pane == Pane::Sidebar {
                    self.apply_selected_filter();
                } else {
                    self.toggle_selected_task();
                }
            }

            KeyCode::Char(' ') | KeyCode::Char('d') => {
                if self.pane == Pane::Tasks {
                    self.toggle_selected_task();
                }
            }

            KeyCode::Char('n') => {
                self.message = None;
                self.mode = Mode::NewTask(TaskForm::default());
            }

            KeyCode::Char('x') => self.request_delete(),

            KeyCode::Char('?') => {
                self.message = Some(
                    "j/k move, tab pane, enter apply/toggle, n new, x delete, q quit".to_string(),
                );
            }

            _ => {}
        }
    }

    fn request_delete(&mut self) {
        match self.pane {
            Pane::Tasks => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::Confirm(ConfirmAction::DeleteTask(task.id));
                }
            }
            Pane::Sidebar => {
                if let Some(SidebarEntry::Project(project)) = self.selected_entry() {
                    if project.id == 1 {
                        self.message = Some(format!(
                            "The '{}' project cannot be deleted",
                            DEFAULT_PROJECT_NAME
                        ));
                    } else {
                        self.mode = Mode::Confirm(ConfirmAction::DeleteProject(project.id));
                    }
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, action: ConfirmAction) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.execute_confirmed(action);
                self.refresh_view();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    fn execute_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteTask(id) => match self.store.delete_task(id) {
                Ok(task) => self.message = Some(format!("Deleted: {}", task.title)),
                Err(e) => self.message = Some(format!("Error: {}", e)),
            },
            ConfirmAction::DeleteProject(id) => match self.store.delete_project(id) {
                Ok(project) => {
                    if self.active == FilterKey::Project(project.name.clone()) {
                        self.active = FilterKey::All;
                        self.sidebar_index = 0;
                    }
                    self.message = Some(format!(
                        "Deleted project '{}' (tasks moved to '{}')",
                        project.name, DEFAULT_PROJECT_NAME
                    ));
                }
                Err(e) => self.message = Some(format!("Error: {}", e)),
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, mut form: TaskForm) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return;
            }

            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                form.field = match form.field {
                    FormField::Title => FormField::Due,
                    FormField::Due => FormField::Title,
                };
            }

            KeyCode::Enter => match self.submit_form(&form) {
                Ok(title) => {
                    self.message = Some(format!("Added: {}", title));
                    self.mode = Mode::Normal;
                    self.refresh_view();
                    return;
                }
                Err(message) => form.error = Some(message),
            },

            KeyCode::Backspace => match form.field {
                FormField::Title => {
                    form.title.pop();
                }
                FormField::Due => {
                    form.due.pop();
                }
            },

            KeyCode::Char(c) => match form.field {
                FormField::Title => form.title.push(c),
                FormField::Due => form.due.push(c),
            },

            _ => {}
        }

        self.mode = Mode::NewTask(form);
    }

    /// Validates the form and adds the task; returns the title on success
    fn submit_form(&mut self, form: &TaskForm) -> Result<String, String> {
        if form.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }

        let due: NaiveDate = form
            .due
            .trim()
            .parse()
            .map_err(|_| "Due date must be YYYY-MM-DD".to_string())?;

        if due < Local::now().date_naive() {
            return Err("Due date cannot be in the past".to_string());
        }

        // New tasks land in the project being viewed, if any
        let project = match &self.active {
            FilterKey::Project(name) => name.clone(),
            _ => self.config.default_project.clone(),
        };
        if self.store.project_by_name(&project).is_none() {
            return Err(format!("No project named '{}'", project));
        }

        let draft = TaskDraft {
            title: form.title.trim().to_string(),
            description: None,
            due,
            priority: self.config.default_priority,
            project,
        };

        self.store
            .add_task(draft)
            .map(|task| task.title)
            .map_err(|e| e.to_string())
    }

    fn apply_selected_filter(&mut self) {
        let entry = match self.selected_entry() {
            Some(entry) => entry,
            None => return,
        };

        self.active = match entry {
            SidebarEntry::Filter(key) => key,
            SidebarEntry::Project(project) => FilterKey::Project(project.name),
        };

        self.store.filter(&self.active);
        self.drain_notifications();
        self.task_index = 0;
    }

    fn toggle_selected_task(&mut self) {
        let id = match self.selected_task() {
            Some(task) => task.id,
            None => return,
        };

        match self.store.toggle_complete(id) {
            Ok(task) => {
                self.message = Some(if task.complete {
                    format!("Completed: {}", task.title)
                } else {
                    format!("Reopened: {}", task.title)
                });
            }
            Err(e) => self.message = Some(format!("Error: {}", e)),
        }

        self.refresh_view();
    }

    /// Re-applies the active filter and picks up pending notifications
    fn refresh_view(&mut self) {
        self.store.filter(&self.active);
        self.drain_notifications();
    }

    /// Applies any pending store notifications to the view
    fn drain_notifications(&mut self) {
        while let Ok(tasks) = self.task_rx.try_recv() {
            self.visible = tasks;
        }
        while let Ok(projects) = self.project_rx.try_recv() {
            self.projects = projects;
        }

        if self.task_index >= self.visible.len() {
            self.task_index = self.visible.len().saturating_sub(1);
        }
        let sidebar_len = self.sidebar_entries().len();
        if self.sidebar_index >= sidebar_len && sidebar_len > 0 {
            self.sidebar_index = sidebar_len - 1;
        }
    }

    fn move_down(&mut self) {
        match self.pane {
            Pane::Sidebar => {
                let len = self.sidebar_entries().len();
                if len > 0 {
                    self.sidebar_index = (self.sidebar_index + 1) % len;
                }
            }
            Pane::Tasks => {
                if !self.visible.is_empty() {
                    self.task_index = (self.task_index + 1) % self.visible.len();
                }
            }
        }
    }

    fn move_up(&mut self) {
        match self.pane {
            Pane::Sidebar => {
                let len = self.sidebar_entries().len();
                if len > 0 {
                    self.sidebar_index = if self.sidebar_index == 0 {
                        len - 1
                    } else {
                        self.sidebar_index - 1
                    };
                }
            }
            Pane::Tasks => {
                if !self.visible.is_empty() {
                    self.task_index = if self.task_index == 0 {
                        self.visible.len() - 1
                    } else {
                        self.task_index - 1
                    };
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors for rendering
    // ------------------------------------------------------------------

    /// Sidebar rows: built-in filters first, then projects
    pub fn sidebar_entries(&self) -> Vec<SidebarEntry> {
        let mut entries: Vec<SidebarEntry> = FilterKey::builtins()
            .into_iter()
            .map(SidebarEntry::Filter)
            .collect();
        entries.extend(self.projects.iter().cloned().map(SidebarEntry::Project));
        entries
    }

    fn selected_entry(&self) -> Option<SidebarEntry> {
        self.sidebar_entries().get(self.sidebar_index).cloned()
    }

    pub fn visible_tasks(&self) -> &[Task] {
        &self.visible
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible.get(self.task_index)
    }

    pub fn task_index(&self) -> usize {
        self.task_index
    }

    pub fn sidebar_index(&self) -> usize {
        self.sidebar_index
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn active_filter(&self) -> &FilterKey {
        &self.active
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Number of tasks assigned to a project, across all filters
    pub fn project_task_count(&self, project: &str) -> usize {
        self.store
            .tasks()
            .iter()
            .filter(|task| task.project == project)
            .count()
    }
}
