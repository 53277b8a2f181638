//! `/api/computers` operations

use log::debug;

use super::PageRequest;
use super::page::Page;
use super::page::decode_page;
use crate::ComputerDbClient;
use crate::error::Error;
use crate::model::ComputerRecord;

impl ComputerDbClient {
    /// Fetches one page of computers.
    ///
    /// Sends `GET {endpoint}?page={p}&pageSize={n}`, adding `query`, `column`
    /// and `order` when the request searches or sorts. The page holds at most
    /// `page_size` records in backend order.
    pub async fn list_computers(&self, request: PageRequest) -> Result<Page<ComputerRecord>, Error> {
        debug!("listing computers page {} (size {})", request.page, request.page_size);

        let url = self.computers_url().clone();
        let response = self.send(self.http().get(url).query(&request.query())).await?;
        let body = Self::body(response).await?;
        Ok(decode_page(request, &body)?)
    }

    /// Fetches a computer by id. Returns `None` when the backend answers 404.
    pub async fn get_computer(&self, id: i64) -> Result<Option<ComputerRecord>, Error> {
        let url = Self::item_url(self.computers_url(), id)?;
        match self.send(self.http().get(url)).await {
            Ok(response) => Ok(Some(Self::json(response).await?)),
            Err(Error::Api(err)) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Creates a computer. The record's `id` is ignored by the backend.
    ///
    /// Returns the `Location` of the new record when the backend sends one.
    pub async fn create_computer(&self, record: &ComputerRecord) -> Result<Option<String>, Error> {
        debug!("creating computer '{}'", record.name);

        let url = self.computers_url().clone();
        let response = self.send(self.http().post(url).json(record)).await?;
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Ok(location)
    }

    /// Replaces a computer. Returns `false` when the backend answers 404.
    pub async fn update_computer(&self, id: i64, record: &ComputerRecord) -> Result<bool, Error> {
        debug!("updating computer {}", id);

        let url = Self::item_url(self.computers_url(), id)?;
        let record = ComputerRecord {
            id: Some(id),
            ..record.clone()
        };
        match self.send(self.http().put(url).json(&record)).await {
            Ok(_) => Ok(true),
            Err(Error::Api(err)) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Deletes a computer. Returns `false` when the backend answers 404.
    pub async fn delete_computer(&self, id: i64) -> Result<bool, Error> {
        debug!("deleting computer {}", id);

        let url = Self::item_url(self.computers_url(), id)?;
        match self.send(self.http().delete(url)).await {
            Ok(_) => Ok(true),
            Err(Error::Api(err)) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }
}
