//! `/api/companies` operations

use super::PageRequest;
use super::page::Page;
use super::page::decode_page;
use crate::ComputerDbClient;
use crate::error::Error;
use crate::model::Company;

impl ComputerDbClient {
    /// Fetches one page of companies.
    pub async fn list_companies(&self, request: PageRequest) -> Result<Page<Company>, Error> {
        let url = self.companies_url().clone();
        let response = self.send(self.http().get(url).query(&request.query())).await?;
        let body = Self::body(response).await?;
        Ok(decode_page(request, &body)?)
    }

    /// Fetches a company by id. Returns `None` when the backend answers 404.
    pub async fn get_company(&self, id: i64) -> Result<Option<Company>, Error> {
        let url = Self::item_url(self.companies_url(), id)?;
        match self.send(self.http().get(url)).await {
            Ok(response) => Ok(Some(Self::json(response).await?)),
            Err(Error::Api(err)) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
