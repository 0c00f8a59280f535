//! Recipes CLI - inspect and exercise the recipe backend core

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recipe_core::LogEvent;

mod commands;
mod output;

use commands::{fixture, get_logger, image_path, log_event, logs, user};

/// Recipes - recipe backend tools
#[derive(Parser)]
#[command(name = "recipes", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate storage paths for uploaded recipe images
    ImagePath {
        /// Original file names (read from stdin if omitted)
        filenames: Vec<String>,
        /// Use this identifier instead of a random UUID
        #[arg(long)]
        fixed_id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: user::UserCommands,
    },

    /// Load a JSON seed file and show the resulting catalog
    Fixture {
        /// Path to the seed file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::ImagePath { .. } => "image-path",
            Commands::User { .. } => "user",
            Commands::Fixture { .. } => "fixture",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let name = cli.command.name();

    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command(name));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("command_failed")
                    .with_command(name)
                    .with_error(e.to_string())
                    .with_error_details(format!("{:#}", e)),
            );
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::ImagePath {
            filenames,
            fixed_id,
            json,
        } => image_path::run(filenames, fixed_id, json),
        Commands::User { command } => user::run(command),
        Commands::Fixture { file, json } => fixture::run(&file, json),
        Commands::Logs { command } => logs::run(command),
    }
}
