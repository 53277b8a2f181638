//! Subcommand implementations.

mod form;
mod listing;
mod login;
mod records;

use crate::cli::Cli;
use crate::cli::Command;
use crate::config;
use crate::error::CliError;

/// Runs the selected subcommand.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::List(args) => listing::computers(&config::client(&cli)?, args).await,
        Command::Show { id } => {
            let config = config::form_config(&cli)?;
            listing::show(&config::client(&cli)?, &config.date_format, *id).await
        }
        Command::Companies(page) => listing::companies(&config::client(&cli)?, *page).await,
        Command::Validate(args) => form::validate(config::form_config(&cli)?, args),
        Command::Add(args) => {
            records::add(&config::client(&cli)?, config::form_config(&cli)?, args).await
        }
        Command::Edit { id, form } => {
            records::edit(&config::client(&cli)?, config::form_config(&cli)?, *id, form).await
        }
        Command::Delete { id } => records::delete(&config::client(&cli)?, *id).await,
        Command::Login => login::login(&cli).await,
    }
}
