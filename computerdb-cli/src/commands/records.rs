//! Commands that change records.

use computerdb_lib::ComputerDbClient;
use computerdb_lib::model::ComputerRecord;
use computerdb_lib::validation::ComputerForm;
use computerdb_lib::validation::FormConfig;

use super::form;
use crate::cli::FormArgs;
use crate::error::CliError;

pub async fn add(client: &ComputerDbClient, config: FormConfig, args: &FormArgs) -> Result<(), CliError> {
    let record = form::submit(&ComputerForm::new(config), None, args)?;
    check_company(client, &record).await?;

    match client.create_computer(&record).await? {
        Some(location) => println!("created '{}' at {}", record.name, location),
        None => println!("created '{}'", record.name),
    }
    Ok(())
}

pub async fn edit(
    client: &ComputerDbClient,
    config: FormConfig,
    id: i64,
    args: &FormArgs,
) -> Result<(), CliError> {
    let existing = client.get_computer(id).await?.ok_or(CliError::NotFound(id))?;
    let record = form::submit(&ComputerForm::new(config), Some(&existing), args)?;
    check_company(client, &record).await?;

    if !client.update_computer(id, &record).await? {
        return Err(CliError::NotFound(id));
    }
    println!("updated {} '{}'", id, record.name);
    Ok(())
}

pub async fn delete(client: &ComputerDbClient, id: i64) -> Result<(), CliError> {
    if !client.delete_computer(id).await? {
        return Err(CliError::NotFound(id));
    }
    println!("deleted {}", id);
    Ok(())
}

/// Fails when the record points at a company the backend does not know.
async fn check_company(client: &ComputerDbClient, record: &ComputerRecord) -> Result<(), CliError> {
    if let Some(company_id) = record.company_id
        && client.get_company(company_id).await?.is_none()
    {
        return Err(CliError::UnknownCompany(company_id));
    }
    Ok(())
}
