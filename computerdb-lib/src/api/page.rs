//! Page types for paginated listings.

use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Column the backend sorts computers by.
///
/// Every column except [`Name`](Self::Name) falls back to the name on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Name,
    Introduced,
    Discontinued,
    CompanyName,
    CompanyId,
}

impl SortColumn {
    /// Value of the `column` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Introduced => "INTRODUCED",
            Self::Discontinued => "DISCONTINUED",
            Self::CompanyName => "COMPANY_NAME",
            Self::CompanyId => "COMPANY_ID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Value of the `order` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Which page to fetch, optionally filtered and sorted.
///
/// # Example
///
/// ```
/// use computerdb_lib::api::{PageRequest, SortColumn, SortOrder};
///
/// let request = PageRequest::new(0, 10)
///     .search("  Apple ")
///     .sort(SortColumn::Introduced, SortOrder::Desc);
///
/// assert_eq!(request.search.as_deref(), Some("apple"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Maximum number of records on the page; at least 1.
    pub page_size: u32,
    /// Case-insensitive name filter, stored trimmed and lowercased.
    pub search: Option<String>,
    /// Sort column and direction; the backend default when `None`.
    pub sort: Option<(SortColumn, SortOrder)>,
}

impl PageRequest {
    /// Creates a request. A page size of 0 is raised to 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
            search: None,
            sort: None,
        }
    }

    /// Filters by name. A blank search clears the filter.
    pub fn search(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref().trim().to_lowercase();
        self.search = (!query.is_empty()).then_some(query);
        self
    }

    pub fn sort(mut self, column: SortColumn, order: SortOrder) -> Self {
        self.sort = Some((column, order));
        self
    }

    /// The request for the following page, keeping search and sort.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Query parameters understood by the backend.
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            query.push(("query", search.clone()));
        }
        if let Some((column, order)) = self.sort {
            query.push(("column", column.as_param().to_string()));
            query.push(("order", order.as_param().to_string()));
        }
        query
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a listing.
///
/// Records keep the backend's order. Totals are only known when the backend
/// answers with its page object rather than a bare array.
///
/// # Example
///
/// ```ignore
/// let page = client.list_computers(PageRequest::new(0, 10)).await?;
///
/// for computer in page.records() {
///     println!("{}", computer.name);
/// }
///
/// if page.has_more() {
///     let next = client.list_computers(page.request().next()).await?;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    records: Vec<T>,
    request: PageRequest,
    total_elements: Option<u64>,
    total_pages: Option<u64>,
}

impl<T> Page<T> {
    /// Creates a page for `request`, keeping at most `page_size` records.
    pub fn new(request: PageRequest, mut records: Vec<T>) -> Self {
        let limit = request.page_size as usize;
        if records.len() > limit {
            warn!(
                "backend returned {} records for a page of {}, dropping the surplus",
                records.len(),
                limit
            );
            records.truncate(limit);
        }

        Self {
            records,
            request,
            total_elements: None,
            total_pages: None,
        }
    }

    /// Sets the total number of records across all pages.
    pub fn with_total_elements(mut self, total: u64) -> Self {
        self.total_elements = Some(total);
        self
    }

    /// Sets the total number of pages.
    pub fn with_total_pages(mut self, total: u64) -> Self {
        self.total_pages = Some(total);
        self
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Zero-based page index.
    pub fn page(&self) -> u32 {
        self.request.page
    }

    pub fn page_size(&self) -> u32 {
        self.request.page_size
    }

    /// The request that produced this page.
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn total_elements(&self) -> Option<u64> {
        self.total_elements
    }

    pub fn total_pages(&self) -> Option<u64> {
        self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if a following page likely exists.
    ///
    /// Uses the total page count when known, otherwise assumes a full page
    /// is followed by another.
    pub fn has_more(&self) -> bool {
        match self.total_pages {
            Some(total) => u64::from(self.request.page) + 1 < total,
            None => self.records.len() == self.request.page_size as usize,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Listing body: a bare array or the backend's page object.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody<T> {
    Array(Vec<T>),
    #[serde(rename_all = "camelCase")]
    Object {
        elements: Vec<T>,
        #[serde(default)]
        total_elements: Option<u64>,
        #[serde(default)]
        total_pages: Option<u64>,
    },
}

/// Decodes a listing body for `request`.
pub(crate) fn decode_page<T: DeserializeOwned>(
    request: PageRequest,
    body: &str,
) -> Result<Page<T>, ApiError> {
    let parsed: PageBody<T> = serde_json::from_str(body)
        .map_err(|e| ApiError::parse_with_body(format!("invalid page body: {}", e), body))?;

    Ok(match parsed {
        PageBody::Array(records) => Page::new(request, records),
        PageBody::Object {
            elements,
            total_elements,
            total_pages,
        } => {
            let mut page = Page::new(request, elements);
            page.total_elements = total_elements;
            page.total_pages = total_pages;
            page
        }
    })
}
