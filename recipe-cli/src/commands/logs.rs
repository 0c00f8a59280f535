//! Logs command - inspect the command event log

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use recipe_core::services::LogEntry;
use recipe_core::{EntryPoint, LoggingService};

use super::get_recipes_dir;
use crate::output::{self, format_timestamp};

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries, newest first
    List {
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only failed commands
        #[arg(long)]
        errors: bool,
        #[arg(long)]
        json: bool,
    },
    /// Delete entries older than N days
    Clear {
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Count runs and failures per command
    Stats {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let recipes_dir = get_recipes_dir()?;
    let service = LoggingService::new(&recipes_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))?;

    match command {
        LogsCommands::List { limit, errors, json } => {
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No log entries found.");
            } else {
                print_entries(entries);
            }
        }
        LogsCommands::Clear {
            older_than_days,
            force,
        } => {
            if !force
                && !Confirm::new()
                    .with_prompt(format!("Delete log entries older than {} days?", older_than_days))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let deleted = service.delete_older_than_days(older_than_days)?;
            println!("Deleted {} log entries", deleted);
        }
        LogsCommands::Stats { json } => {
            let per_command = tally(&service.get_recent(usize::MAX)?);
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "log_path": service.log_path().to_string_lossy(),
                        "commands": per_command
                            .iter()
                            .map(|(name, (runs, failures))| {
                                let counts = serde_json::json!({ "runs": runs, "failures": failures });
                                (name.clone(), counts)
                            })
                            .collect::<serde_json::Map<_, _>>(),
                    })
                );
                return Ok(());
            }

            println!("{} {}", "Log file:".bold(), service.log_path().display());
            let mut table = output::create_table();
            table.set_header(vec!["Command", "Runs", "Failures"]);
            for (name, (runs, failures)) in per_command {
                let failures = if failures > 0 {
                    failures.to_string().red().to_string()
                } else {
                    failures.to_string()
                };
                table.add_row(vec![name, runs.to_string(), failures]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn print_entries(entries: Vec<LogEntry>) {
    let mut table = output::create_table();
    table.set_header(vec!["Time", "Event", "Command", "Error"]);
    for entry in entries {
        table.add_row(vec![
            format_timestamp(entry.timestamp),
            entry.event,
            entry.command.unwrap_or_default(),
            entry.error_message.unwrap_or_default().red().to_string(),
        ]);
    }
    println!("{}", table);
}

// (runs, failures) keyed by command name
fn tally(entries: &[LogEntry]) -> BTreeMap<String, (u64, u64)> {
    let mut counts: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for entry in entries {
        let Some(command) = &entry.command else {
            continue;
        };
        let slot = counts.entry(command.clone()).or_default();
        match entry.event.as_str() {
            "command_executed" => slot.0 += 1,
            "command_failed" => slot.1 += 1,
            _ => {}
        }
    }
    counts
}
