//! Task domain model
//!
//! A task carries a title, a description, a due date, a priority and the
//! name of the project it belongs to. Completion is a plain boolean that
//! drives both list ordering and the overdue filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder stored when a task is created or edited without a description
pub const NO_DESCRIPTION: &str = "No description";

#[derive(Debug, Error, PartialEq)]
pub enum PriorityError {
    #[error("Invalid priority '{0}': expected high, medium or low")]
    Invalid(String),
}

/// Task priority
///
/// Serialized with its display casing (`"High"`, `"Medium"`, `"Low"`) to
/// match the stored task format. Parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(PriorityError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = PriorityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.to_string()
    }
}

/// The field bundle the interface collects for creating or editing a task
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due: NaiveDate,
    pub priority: Priority,
    pub project: String,
}

/// A single to-do item
///
/// The serialized field names (`task`, `duedate`) follow the stored JSON
/// format, which predates this implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the task collection
    pub id: u64,

    /// Short human-readable title
    #[serde(rename = "task")]
    pub title: String,

    /// Free-form description, never empty (see [`NO_DESCRIPTION`])
    pub description: String,

    /// Calendar due date
    #[serde(rename = "duedate")]
    pub due: NaiveDate,

    /// Priority bucket
    pub priority: Priority,

    /// Name of the project this task belongs to
    pub project: String,

    /// Whether the task is done
    pub complete: bool,
}

impl Task {
    /// Creates a task from a draft, applying the description placeholder
    pub fn new(id: u64, draft: TaskDraft) -> Self {
        let mut task = Self {
            id,
            title: String::new(),
            description: String::new(),
            due: draft.due,
            priority: draft.priority,
            project: String::new(),
            complete: false,
        };
        task.apply(draft);
        task
    }

    /// Replaces every editable field from a draft, keeping id and completion
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = match draft.description {
            Some(description) if !description.is_empty() => description,
            _ => NO_DESCRIPTION.to_string(),
        };
        self.due = draft.due;
        self.priority = draft.priority;
        self.project = draft.project;
    }
}
