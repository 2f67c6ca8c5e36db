//! CLI commands
//!
//! Each command maps onto one manager operation and reports its outcome.

pub mod app;
pub mod system;

use std::io::{self, Write};

use anyhow::Result;
use clap::Subcommand;
use rtam_core::Outcome;
use rtam_runtime::Manager;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch an application and whatever it requires
    Launch(app::LaunchArgs),

    /// Stop an application and drop its process record
    Terminate(app::NameArgs),

    /// Move an application out of the foreground
    Exit(app::NameArgs),

    /// Report an asynchronous hook completion
    Status(app::StatusArgs),

    /// List live processes
    List(system::ListArgs),

    /// List every application in the image
    Apps,

    /// Read commands from standard input
    Shell,
}

/// Run one command against the manager
pub fn execute<W: Write>(manager: &Manager, command: Commands, out: &mut W) -> Result<Outcome> {
    match command {
        Commands::Launch(args) => app::execute_launch(manager, &args, out),
        Commands::Terminate(args) => app::execute_terminate(manager, &args, out),
        Commands::Exit(args) => app::execute_exit(manager, &args, out),
        Commands::Status(args) => app::execute_status(manager, &args, out),
        Commands::List(args) => system::execute_list(manager, &args, out),
        Commands::Apps => system::execute_apps(manager, out),
        Commands::Shell => system::run_shell(manager, io::stdin().lock(), out),
    }
}
