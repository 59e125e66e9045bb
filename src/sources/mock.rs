//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::models::RemoteBookRecord;
use crate::sources::{BookSource, SourceError};

/// Canned reply returned by [`MockBookSource`]
#[derive(Debug, Clone, Default)]
struct MockReply {
    books: Vec<RemoteBookRecord>,
    delay: Duration,
    fail: bool,
}

/// A mock source that returns predefined replies and counts calls.
#[derive(Debug, Default)]
pub struct MockBookSource {
    default_reply: Mutex<MockReply>,
    replies: Mutex<HashMap<String, MockReply>>,
    calls: AtomicUsize,
}

impl MockBookSource {
    /// Create a new mock source that returns no books.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the books returned for any query without a specific reply.
    pub fn set_books(&self, books: Vec<RemoteBookRecord>) {
        let mut guard = self.default_reply.lock().unwrap_or_else(PoisonError::into_inner);
        guard.books = books;
        guard.fail = false;
    }

    /// Make every query without a specific reply fail.
    pub fn set_failure(&self) {
        self.default_reply.lock().unwrap_or_else(PoisonError::into_inner).fail = true;
    }

    /// Return `books` for `query` after waiting `delay`.
    pub fn set_reply_for(&self, query: &str, books: Vec<RemoteBookRecord>, delay: Duration) {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).insert(
            query.to_string(),
            MockReply {
                books,
                delay,
                fail: false,
            },
        );
    }

    /// Number of times the provider was actually queried.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookSource for MockBookSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn try_search(&self, query: &str) -> Result<Vec<RemoteBookRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = {
            let replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
            match replies.get(query) {
                Some(reply) => reply.clone(),
                None => self.default_reply.lock().unwrap_or_else(PoisonError::into_inner).clone(),
            }
        };

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }

        if reply.fail {
            return Err(SourceError::Network("mock failure".to_string()));
        }

        Ok(reply.books)
    }
}

/// Helper function to create a mock book for testing.
pub fn make_book(title: &str) -> RemoteBookRecord {
    RemoteBookRecord::new(title).online_link(format!(
        "http://example.com/works/{}",
        title.to_lowercase().replace(' ', "-")
    ))
}
