//! Presentation-shell state: the current selection over the catalog and the
//! remote results list.
//!
//! A [`VaultSession`] recomputes the visible catalog subset synchronously on
//! every change. Remote lookups run as detached futures produced by
//! [`VaultSession::lookup_task`]; each takes a generation ticket when it is
//! created, and only the newest ticket may replace the remote results list.
//!
//! ```rust
//! use engineer_vault::session::VaultSession;
//! use engineer_vault::sources::MockBookSource;
//! use std::sync::Arc;
//!
//! let mut session = VaultSession::builtin(Arc::new(MockBookSource::new()));
//! session.set_query("stm32");
//! assert_eq!(session.visible().len(), 1);
//! ```

mod command;
mod remote;

pub use command::{CommandError, ShellCommand, HELP_TEXT};
pub use remote::{LookupPhase, LookupTicket, RemoteResults};

use std::future::Future;
use std::sync::Arc;

use crate::catalog::{self, Catalog};
use crate::models::{Category, Choice, FilterSelection, Level, ResourceRecord, ResourceType};
use crate::sources::BookSource;

/// What the shell should do after a command was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Re-render the visible resources
    Render,
    /// Re-render and start a remote lookup for the query
    RenderAndLookup(String),
    /// Start a remote lookup for the query
    Lookup(String),
    /// List categories
    Categories,
    /// Show tag suggestions for the current query
    Suggest,
    /// Show the current filters
    Show,
    /// Show the command help
    Help,
    /// Report the live-lookup toggle
    LiveChanged(bool),
    /// Leave the shell
    Quit,
}

/// Interactive browsing state
#[derive(Debug, Clone)]
pub struct VaultSession {
    catalog: Arc<Catalog>,
    selection: FilterSelection,
    remote: Arc<RemoteResults>,
    source: Arc<dyn BookSource>,
    live: bool,
}

impl VaultSession {
    /// Create a session over `catalog` that looks books up through `source`
    pub fn new(catalog: Arc<Catalog>, source: Arc<dyn BookSource>) -> Self {
        Self {
            catalog,
            selection: FilterSelection::default(),
            remote: Arc::new(RemoteResults::new()),
            source,
            live: false,
        }
    }

    /// Create a session over the built-in catalog
    pub fn builtin(source: Arc<dyn BookSource>) -> Self {
        Self::new(Arc::new(Catalog::builtin()), source)
    }

    /// Look books up for every query line as well
    pub fn with_live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn remote(&self) -> &Arc<RemoteResults> {
        &self.remote
    }

    pub fn source(&self) -> &Arc<dyn BookSource> {
        &self.source
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.selection.query = query.into();
    }

    pub fn set_category(&mut self, category: Choice<Category>) {
        self.selection.category = category;
    }

    pub fn set_kind(&mut self, kind: Choice<ResourceType>) {
        self.selection.kind = kind;
    }

    pub fn set_level(&mut self, level: Choice<Level>) {
        self.selection.level = level;
    }

    pub fn set_year(&mut self, year: Choice<String>) {
        self.selection.year = year;
    }

    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    /// Clear every filter; the remote results list is left alone
    pub fn reset(&mut self) {
        self.selection.reset();
    }

    /// Resources passing the current selection, in catalog order
    pub fn visible(&self) -> Vec<&ResourceRecord> {
        catalog::filter(self.catalog.resources(), &self.selection)
    }

    /// Tag suggestions for the current query
    pub fn suggestions(&self) -> Vec<String> {
        catalog::suggestions(self.catalog.resources(), &self.selection.query)
    }

    /// Start a remote lookup and return the future that completes it.
    ///
    /// The generation ticket is taken here, not when the future is first
    /// polled, so lookups are ordered by when they were requested. The future
    /// resolves to `true` if its response was committed.
    pub fn lookup_task(&self, query: &str) -> impl Future<Output = bool> + Send + 'static {
        let remote = Arc::clone(&self.remote);
        let source = Arc::clone(&self.source);
        let query = query.trim().to_string();
        let ticket = remote.begin(&query);
        tracing::debug!(generation = ticket.generation(), %query, "lookup requested");

        async move {
            let books = source.search(&query).await;
            remote.commit(&ticket, books)
        }
    }

    /// Apply one shell command to the session
    pub fn apply(&mut self, command: ShellCommand) -> ShellAction {
        match command {
            ShellCommand::Query(query) => {
                self.set_query(query);
                if self.live {
                    ShellAction::RenderAndLookup(self.selection.normalized_query().to_string())
                } else {
                    ShellAction::Render
                }
            }
            ShellCommand::Category(category) => {
                self.set_category(category);
                ShellAction::Render
            }
            ShellCommand::Kind(kind) => {
                self.set_kind(kind);
                ShellAction::Render
            }
            ShellCommand::Level(level) => {
                self.set_level(level);
                ShellAction::Render
            }
            ShellCommand::Year(year) => {
                self.set_year(year);
                ShellAction::Render
            }
            ShellCommand::Books(query) => ShellAction::Lookup(query),
            ShellCommand::Live(live) => {
                self.set_live(live);
                ShellAction::LiveChanged(live)
            }
            ShellCommand::Reset => {
                self.reset();
                ShellAction::Render
            }
            ShellCommand::Show => ShellAction::Show,
            ShellCommand::Categories => ShellAction::Categories,
            ShellCommand::Suggest => ShellAction::Suggest,
            ShellCommand::Help => ShellAction::Help,
            ShellCommand::Quit => ShellAction::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::make_book;
    use crate::sources::MockBookSource;
    use std::time::Duration;

    fn session_with(source: Arc<MockBookSource>) -> VaultSession {
        VaultSession::builtin(source)
    }

    #[test]
    fn test_selection_updates_visible() {
        let mut session = session_with(Arc::new(MockBookSource::new()));
        assert_eq!(session.visible().len(), 4);

        session.set_category(Choice::Only(Category::EmbeddedSystems));
        session.set_level(Choice::Only(Level::Beginner));
        let visible = session.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "STM32 Embedded Systems Lab");

        session.reset();
        assert_eq!(session.visible().len(), 4);
    }

    #[test]
    fn test_apply_commands() {
        let mut session = session_with(Arc::new(MockBookSource::new()));

        assert_eq!(
            session.apply(ShellCommand::Kind(Choice::Only(ResourceType::Code))),
            ShellAction::Render
        );
        assert_eq!(session.visible().len(), 1);

        assert_eq!(
            session.apply(ShellCommand::Books("statics".to_string())),
            ShellAction::Lookup("statics".to_string())
        );
        assert_eq!(session.apply(ShellCommand::Live(true)), ShellAction::LiveChanged(true));
        assert_eq!(
            session.apply(ShellCommand::Query(" robot ".to_string())),
            ShellAction::RenderAndLookup("robot".to_string())
        );
        assert_eq!(session.apply(ShellCommand::Reset), ShellAction::Render);
        assert!(session.selection().is_unconstrained());
        assert_eq!(session.apply(ShellCommand::Quit), ShellAction::Quit);
    }

    #[test]
    fn test_suggestions_follow_query() {
        let mut session = session_with(Arc::new(MockBookSource::new()));
        assert_eq!(session.suggestions()[0], "robotics control");

        session.set_query("ansys");
        assert_eq!(session.suggestions(), vec!["ansys".to_string()]);
    }

    #[tokio::test]
    async fn test_lookup_task_commits() {
        let source = Arc::new(MockBookSource::new());
        source.set_books(vec![make_book("Engineering Mechanics")]);
        let session = session_with(source.clone());

        assert!(session.lookup_task("mechanics").await);
        assert_eq!(session.remote().phase(), LookupPhase::Displaying);
        assert_eq!(session.remote().books().len(), 1);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_slow_stale_lookup_does_not_overwrite_newer() {
        let source = Arc::new(MockBookSource::new());
        source.set_reply_for(
            "control",
            vec![make_book("Old Control Notes")],
            Duration::from_millis(200),
        );
        source.set_reply_for(
            "control systems",
            vec![make_book("Modern Control Systems")],
            Duration::from_millis(10),
        );
        let session = session_with(source.clone());

        let slow = tokio::spawn(session.lookup_task("control"));
        let fast = tokio::spawn(session.lookup_task("control systems"));

        assert!(fast.await.unwrap());
        assert!(!slow.await.unwrap());

        let books = session.remote().books();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Modern Control Systems");
        assert_eq!(session.remote().query(), "control systems");
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_lookup_clears_without_network() {
        let source = Arc::new(MockBookSource::new());
        source.set_books(vec![make_book("Anything")]);
        let session = session_with(source.clone());

        assert!(session.lookup_task("   ").await);
        assert!(session.remote().books().is_empty());
        assert_eq!(session.remote().phase(), LookupPhase::Idle);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_lookup_shows_empty() {
        let source = Arc::new(MockBookSource::new());
        source.set_failure();
        let session = session_with(source);

        assert!(session.lookup_task("thermodynamics").await);
        assert!(session.remote().books().is_empty());
        assert_eq!(session.remote().phase(), LookupPhase::Displaying);
    }
}
