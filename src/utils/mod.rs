//! Utility modules supporting catalog browsing and remote lookups.
//!
//! - [`HttpClient`]: shared HTTP client with a bounded request timeout
//! - [`truncate_with_ellipsis`]: width-aware truncation for table cells
//! - [`resource_table`] / [`book_table`]: table renderers for the CLI
//!
//! # HTTP Client
//!
//! ```rust,no_run
//! use engineer_vault::utils::HttpClient;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(Duration::from_secs(5))?;
//! let _response = client.client().get("https://openlibrary.org").send().await?;
//! # Ok(())
//! # }
//! ```

mod display;
mod http;

pub use display::{
    book_lines, book_table, resource_lines, resource_table, truncate_with_ellipsis,
    NO_BOOKS_MESSAGE, NO_RESOURCES_MESSAGE,
};
pub use http::{HttpClient, DEFAULT_USER_AGENT};
