//! Computer record exchanged with the backend.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// A computer as exposed by `/api/computers`.
///
/// Dates travel as ISO `yyyy-MM-dd` strings. `company_name` is filled in by
/// the backend on reads and ignored on writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerRecord {
    /// Backend identifier, absent until the record is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Date the computer was introduced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced: Option<NaiveDate>,
    /// Date the computer was discontinued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discontinued: Option<NaiveDate>,
    /// Identifier of the manufacturing company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Name of the manufacturing company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl ComputerRecord {
    /// Creates a record with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            introduced: None,
            discontinued: None,
            company_id: None,
            company_name: None,
        }
    }

    /// Sets the backend identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the introduction date.
    pub fn with_introduced(mut self, date: NaiveDate) -> Self {
        self.introduced = Some(date);
        self
    }

    /// Sets the discontinuation date.
    pub fn with_discontinued(mut self, date: NaiveDate) -> Self {
        self.discontinued = Some(date);
        self
    }

    /// Sets the company reference.
    pub fn with_company(mut self, company_id: i64) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

impl std::fmt::Display for ComputerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn date(d: Option<NaiveDate>) -> String {
            d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
        }

        let id = self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{:>6}  {:<40}  {:<10}  {:<10}  {}",
            id,
            self.name,
            date(self.introduced),
            date(self.discontinued),
            self.company_name.as_deref().unwrap_or("-"),
        )
    }
}
