//! # EngineerVault
//!
//! A catalog of engineering learning resources that can be narrowed by
//! category, file type, academic level, year and free text, plus a remote
//! book lookup against Open Library.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (ResourceRecord, FilterSelection, RemoteBookRecord)
//! - [`catalog`]: The static catalog and the filter/suggestion functions over it
//! - [`sources`]: Remote book sources behind the [`BookSource`] trait
//! - [`session`]: Interactive shell state and stale-safe remote results
//! - [`utils`]: HTTP client and table rendering
//! - [`config`]: Configuration management

pub mod catalog;
pub mod config;
pub mod models;
pub mod session;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use catalog::Catalog;
pub use models::{FilterSelection, RemoteBookRecord, ResourceRecord};
pub use session::VaultSession;
pub use sources::{BookSource, OpenLibrarySource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
