//! tick - Local-first to-do list manager for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = ticklist::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
