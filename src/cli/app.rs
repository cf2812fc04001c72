//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{project_cmd, status_cmd, task_cmd, tui};
use crate::storage::{GlobalConfig, Workspace};

#[derive(Parser)]
#[command(name = "tick")]
#[command(author, version, about = "Local-first to-do list manager for the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new tick workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Add a task
    Add(task_cmd::AddArgs),

    /// Edit an existing task
    Edit(task_cmd::EditArgs),

    /// Toggle a task between done and open
    Done {
        /// Task id
        id: u64,
    },

    /// Delete a task
    #[command(visible_alias = "rm")]
    Delete {
        /// Task id
        id: u64,
    },

    /// Show the details of a task
    Show {
        /// Task id
        id: u64,
    },

    /// List tasks through a filter
    List {
        /// all, today, upcoming, overdue, High, Medium, Low, or a project name
        filter: Option<String>,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(project_cmd::ProjectCommands),

    /// Show workspace status overview
    Status,

    /// Open the interactive terminal interface
    Tui,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_else(default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("tick starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing workspace at: {}", path));
            let workspace = Workspace::init(&path)?;
            output.success(&format!(
                "Initialized tick workspace at {}",
                workspace.root().display()
            ));
        }

        Commands::Add(args) => task_cmd::add(&output, args)?,
        Commands::Edit(args) => task_cmd::edit(&output, args)?,
        Commands::Done { id } => task_cmd::done(&output, id)?,
        Commands::Delete { id } => task_cmd::delete(&output, id)?,
        Commands::Show { id } => task_cmd::show(&output, id)?,
        Commands::List { filter } => task_cmd::list(&output, filter.as_deref())?,
        Commands::Project(cmd) => project_cmd::run(cmd, &output)?,
        Commands::Status => status_cmd::run(&output)?,
        Commands::Tui => tui::run(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Resolves the output format from user-wide configuration
fn default_format() -> OutputFormat {
    use clap::ValueEnum;

    GlobalConfig::load()
        .ok()
        .and_then(|config| config.default_format)
        .and_then(|value| OutputFormat::from_str(&value, true).ok())
        .unwrap_or_default()
}
