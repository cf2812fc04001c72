//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Workspace management | `init`, `status` |
//! | Task | Task lifecycle | `add`, `edit`, `done`, `delete`, `show` |
//! | Query | Filtered views | `list today`, `list High`, `list Work` |
//! | Project | Project management | `project add`, `project list` |
//! | Interactive | Full-screen interface | `tui` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! tick --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task_cmd;
mod project_cmd;
mod status_cmd;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
