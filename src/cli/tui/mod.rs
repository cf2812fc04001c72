//! Interactive terminal interface
//!
//! A full-screen front end over the store: filters and projects in a
//! sidebar, the task list in the middle, details on the right. The
//! interface renders whatever the store announces, so every change goes
//! through the same persist-then-notify path the CLI uses.

mod app;
mod event;
mod term;
mod ui;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::storage::Workspace;
use crate::store::Store;
use app::App;
use event::EventHandler;

/// Launch the interactive interface
pub fn run(output: &Output) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let (store, report) = Store::for_workspace(&workspace);
    for issue in report.issues() {
        output.warn(issue);
    }

    output.verbose_ctx("tui", "Initializing interactive interface");

    let mut terminal = term::init()?;
    let mut app = App::new(store, workspace.config().clone());
    let event_handler = EventHandler::new(250);

    // Run the main loop with panic safety so the terminal is always restored
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = term::restore();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Interface panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Interface panicked: {}", s))
            } else {
                Err(anyhow!("Interface panicked with unknown error"))
            }
        }
    }
}
