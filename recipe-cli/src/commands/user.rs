//! User command - run the user manager and show the resulting record

use std::env;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Password;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user (or superuser) and print it
    Create {
        /// Email address (stored lowercased)
        #[arg(long)]
        email: String,
        /// Password (falls back to RECIPES_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
        /// Grant staff and superuser flags
        #[arg(long)]
        superuser: bool,
        /// Leave the account without a usable password
        #[arg(long, conflicts_with = "password")]
        no_password: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Get password from --password flag, RECIPES_PASSWORD env var, or prompt
fn get_password_or_prompt(password_flag: Option<String>) -> Result<String> {
    if let Some(p) = password_flag {
        return Ok(p);
    }

    if let Ok(p) = env::var("RECIPES_PASSWORD") {
        return Ok(p);
    }

    let p = Password::new()
        .with_prompt("Password")
        .with_confirmation("Password (again)", "Passwords do not match")
        .interact()?;
    Ok(p)
}

pub fn run(command: UserCommands) -> Result<()> {
    match command {
        UserCommands::Create {
            email,
            password,
            superuser,
            no_password,
            json,
        } => {
            let ctx = get_context()?;
            let password = if no_password {
                None
            } else {
                Some(get_password_or_prompt(password)?)
            };

            let user = if superuser {
                ctx.user_service
                    .create_superuser(Some(email.as_str()), password.as_deref())?
            } else {
                ctx.user_service.create_user(Some(email.as_str()), password.as_deref())?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
                return Ok(());
            }

            println!("{}", "User created".green());
            let mut table = output::create_table();
            table.add_row(vec!["ID", &user.id.to_string()]);
            table.add_row(vec!["Email", &user.email]);
            table.add_row(vec!["Staff", output::yes_no(user.is_staff)]);
            table.add_row(vec!["Superuser", output::yes_no(user.is_superuser)]);
            table.add_row(vec!["Usable password", output::yes_no(user.has_usable_password())]);
            println!("{}", table);
        }
    }

    Ok(())
}
