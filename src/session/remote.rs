//! Generation-guarded store for remote lookup results.

use serde::Serialize;
use std::sync::Mutex;

use crate::models::RemoteBookRecord;

/// Where the remote results list currently stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPhase {
    /// No lookup has been made, or the last one was cleared
    #[default]
    Idle,
    /// A lookup is in flight
    Awaiting,
    /// The latest lookup has been committed
    Displaying,
}

/// Proof that a lookup was started; only the newest ticket may commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    query: String,
}

impl LookupTicket {
    /// Generation number assigned when the lookup started
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Query the lookup was started for
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Default)]
struct RemoteState {
    latest: u64,
    phase: LookupPhase,
    query: String,
    books: Vec<RemoteBookRecord>,
}

/// Remote results list that ignores responses to superseded lookups.
///
/// Each [`begin`](Self::begin) takes a new generation. A response is committed
/// only if no newer lookup has started since, so a slow stale response can
/// never overwrite a newer one.
#[derive(Debug, Default)]
pub struct RemoteResults {
    state: Mutex<RemoteState>,
}

impl RemoteResults {
    /// Create an empty, idle store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RemoteState> {
        // State stays consistent even if a holder panicked; every write is a full replacement
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a lookup, superseding any in flight
    pub fn begin(&self, query: &str) -> LookupTicket {
        let mut state = self.lock();
        state.latest += 1;
        state.phase = LookupPhase::Awaiting;
        LookupTicket {
            generation: state.latest,
            query: query.to_string(),
        }
    }

    /// Replace the list with `books` if `ticket` is still the newest lookup.
    ///
    /// Returns `false` and leaves the list untouched for a stale ticket.
    pub fn commit(&self, ticket: &LookupTicket, books: Vec<RemoteBookRecord>) -> bool {
        let mut state = self.lock();
        if ticket.generation != state.latest {
            tracing::debug!(
                generation = ticket.generation,
                latest = state.latest,
                query = %ticket.query,
                "discarding stale lookup response"
            );
            return false;
        }

        state.phase = if ticket.query.trim().is_empty() {
            LookupPhase::Idle
        } else {
            LookupPhase::Displaying
        };
        state.query = ticket.query.clone();
        state.books = books;
        true
    }

    /// Whether `ticket` belongs to the newest lookup
    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.lock().latest == ticket.generation
    }

    /// Drop the current list and supersede any lookup in flight
    pub fn clear(&self) {
        let mut state = self.lock();
        state.latest += 1;
        state.phase = LookupPhase::Idle;
        state.query.clear();
        state.books.clear();
    }

    /// Current phase
    pub fn phase(&self) -> LookupPhase {
        self.lock().phase
    }

    /// Query of the committed list
    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    /// Snapshot of the committed list
    pub fn books(&self) -> Vec<RemoteBookRecord> {
        self.lock().books.clone()
    }

    /// Newest generation handed out
    pub fn generation(&self) -> u64 {
        self.lock().latest
    }
}
