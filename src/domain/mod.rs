//! Domain models for tick
//!
//! Contains the core business logic without any I/O concerns.

mod task;
mod project;
mod filter;

pub use task::{Priority, PriorityError, Task, TaskDraft, NO_DESCRIPTION};
pub use project::{Project, DEFAULT_PROJECT_NAME};
pub use filter::FilterKey;
