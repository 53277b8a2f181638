//! Computer and company endpoints
//!
//! All operations are `async` methods on [`ComputerDbClient`](crate::ComputerDbClient).
//!
//! # Example
//!
//! ```ignore
//! use computerdb_lib::api::PageRequest;
//!
//! let page = client.list_computers(PageRequest::new(0, 10)).await?;
//! let computer = client.get_computer(page.records()[0].id.unwrap()).await?;
//! ```

mod companies;
mod computers;
mod page;

pub use page::DEFAULT_PAGE_SIZE;
pub use page::Page;
pub use page::PageRequest;
pub use page::SortColumn;
pub use page::SortOrder;
