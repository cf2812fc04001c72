//! tick - A local-first to-do list manager for the terminal
//!
//! tick keeps tasks and projects in plain JSON files inside a `.tick/`
//! directory, with commands for adding, filtering, and completing tasks
//! and an interactive terminal interface.

pub mod cli;
pub mod domain;
pub mod storage;
pub mod store;

pub use domain::{FilterKey, Priority, Project, Task, TaskDraft};
pub use store::{Store, StoreError};
