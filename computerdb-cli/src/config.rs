//! Turns arguments into a client and a form configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use computerdb_lib::ComputerDbClient;
use computerdb_lib::auth::CachedTokenProvider;
use computerdb_lib::auth::PasswordFlow;
use computerdb_lib::error::Error;
use computerdb_lib::validation::DateFormat;
use computerdb_lib::validation::FormConfig;
use log::debug;

use crate::cli::Cli;
use crate::error::CliError;
use crate::paths;

const MESSAGES_FILE: &str = "messages.properties";

/// Builds the API client, logging in when an auth endpoint is configured.
pub fn client(cli: &Cli) -> Result<ComputerDbClient, CliError> {
    let mut builder = ComputerDbClient::builder().endpoint(&cli.url);

    if let Some(url) = &cli.companies_url {
        builder = builder.companies_endpoint(url);
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(flow) = password_flow(cli)? {
        builder = builder.token_provider(CachedTokenProvider::new(flow));
    }

    Ok(builder.build()?)
}

/// The login flow, or `None` when no auth endpoint is configured.
pub fn password_flow(cli: &Cli) -> Result<Option<PasswordFlow>, CliError> {
    let Some(auth_url) = &cli.auth_url else {
        return Ok(None);
    };
    let username = cli
        .username
        .as_deref()
        .ok_or_else(|| CliError::Config("--username is required with --auth-url".into()))?;
    let password = cli
        .password
        .as_deref()
        .ok_or_else(|| CliError::Config("--password is required with --auth-url".into()))?;

    Ok(Some(PasswordFlow::new(auth_url, username, password)))
}

/// Loads messages and the date format.
///
/// The bundle comes from `--messages`, else `messages.properties` in the
/// config directory when present. `--date-format` overrides the bundle's
/// `date.format`.
pub fn form_config(cli: &Cli) -> Result<FormConfig, CliError> {
    let mut config = match messages_path(cli) {
        Some(path) => {
            debug!("loading messages from {}", path.display());
            let source = fs::read_to_string(&path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            FormConfig::from_properties(&source).map_err(Error::from)?
        }
        None => FormConfig::default(),
    };

    if let Some(template) = &cli.date_format {
        config = config.with_date_format(DateFormat::new(template.as_str()).map_err(Error::from)?);
    }

    Ok(config)
}

fn messages_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.messages {
        return Some(path.clone());
    }
    paths::config_dir()
        .map(|dir| dir.join(MESSAGES_FILE))
        .filter(|path| path.is_file())
}
