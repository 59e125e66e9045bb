//! Remote book lookup sources.
//!
//! This module defines the [`BookSource`] trait that every remote book
//! provider implements, and ships the [`OpenLibrarySource`] implementation
//! plus a [`MockBookSource`] for tests.
//!
//! # Failure policy
//!
//! [`BookSource::try_search`] reports failures as typed [`SourceError`]s.
//! [`BookSource::lookup`] folds them into a [`LookupOutcome`], and
//! [`BookSource::search`] collapses every failure into an empty list so the
//! presentation layer can always render an empty state. A blank query never
//! reaches the network on either path.
//!
//! ```rust,no_run
//! use engineer_vault::sources::{BookSource, OpenLibrarySource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = OpenLibrarySource::new()?;
//! for book in source.search("control systems").await {
//!     println!("{} - {}", book.title, book.author);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
mod openlibrary;

pub use mock::MockBookSource;
pub use openlibrary::OpenLibrarySource;

use async_trait::async_trait;

use crate::models::RemoteBookRecord;

/// Interface for a remote book search provider
#[async_trait]
pub trait BookSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "openlibrary")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Query the provider, reporting failures as typed errors.
    ///
    /// Callers are expected to pass a trimmed, non-empty query.
    async fn try_search(&self, query: &str) -> Result<Vec<RemoteBookRecord>, SourceError>;

    /// Query the provider and classify the result
    async fn lookup(&self, query: &str) -> LookupOutcome {
        let query = query.trim();
        if query.is_empty() {
            return LookupOutcome::NoMatches;
        }

        match self.try_search(query).await {
            Ok(books) if books.is_empty() => LookupOutcome::NoMatches,
            Ok(books) => LookupOutcome::Found(books),
            Err(err) => {
                tracing::warn!(source = self.id(), query, error = %err, "book lookup failed");
                LookupOutcome::Failed(err)
            }
        }
    }

    /// Query the provider, resolving to an empty list on any failure
    async fn search(&self, query: &str) -> Vec<RemoteBookRecord> {
        self.lookup(query).await.into_books()
    }
}

/// Result of a remote lookup with failures kept distinct from empty results
#[derive(Debug)]
pub enum LookupOutcome {
    /// At least one book matched
    Found(Vec<RemoteBookRecord>),

    /// The query was blank or the provider returned no documents
    NoMatches,

    /// The lookup failed; the presentation layer treats this as empty
    Failed(SourceError),
}

impl LookupOutcome {
    /// The books found, empty for both no-match and failure
    pub fn into_books(self) -> Vec<RemoteBookRecord> {
        match self {
            LookupOutcome::Found(books) => books,
            LookupOutcome::NoMatches | LookupOutcome::Failed(_) => Vec::new(),
        }
    }

    /// Borrow the books found
    pub fn books(&self) -> &[RemoteBookRecord] {
        match self {
            LookupOutcome::Found(books) => books,
            LookupOutcome::NoMatches | LookupOutcome::Failed(_) => &[],
        }
    }

    /// Whether the lookup failed
    pub fn is_failure(&self) -> bool {
        matches!(self, LookupOutcome::Failed(_))
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&SourceError> {
        match self {
            LookupOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors that can occur when talking to a book source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The provider answered with a non-success status
    #[error("API returned status {status}")]
    Api { status: u16 },

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters or source configuration
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::Api {
                status: status.as_u16(),
            }
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("invalid URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_collapses_to_empty() {
        let failed = LookupOutcome::Failed(SourceError::Timeout);
        assert!(failed.is_failure());
        assert!(failed.books().is_empty());
        assert!(matches!(failed.error(), Some(SourceError::Timeout)));
        assert!(failed.into_books().is_empty());

        assert!(LookupOutcome::NoMatches.into_books().is_empty());

        let found = LookupOutcome::Found(vec![RemoteBookRecord::new("Statics")]);
        assert!(!found.is_failure());
        assert_eq!(found.into_books().len(), 1);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SourceError::Api { status: 500 }.to_string(),
            "API returned status 500"
        );
        assert_eq!(SourceError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(SourceError::from(err), SourceError::Parse(_)));
    }
}
