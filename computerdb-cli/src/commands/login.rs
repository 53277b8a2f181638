use computerdb_lib::error::Error;

use crate::cli::Cli;
use crate::config;
use crate::error::CliError;

/// Logs in once to check the configured credentials.
pub async fn login(cli: &Cli) -> Result<(), CliError> {
    let flow = config::password_flow(cli)?
        .ok_or_else(|| CliError::Config("--auth-url is required to log in".into()))?;

    let token = flow.authenticate().await.map_err(Error::from)?;

    println!("logged in as '{}' at {}", flow.username(), flow.endpoint());
    match token.expires_at {
        Some(expires_at) => println!("token expires at {}", expires_at.to_rfc3339()),
        None => println!("token has no expiry"),
    }
    Ok(())
}
