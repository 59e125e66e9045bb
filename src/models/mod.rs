//! Core data models for catalog resources, filter selections and remote books.

mod book;
mod resource;
mod selection;

pub use book::{BookYear, RemoteBookRecord, UNKNOWN_AUTHOR, UNTITLED};
pub use resource::{Category, Level, ParseLabelError, ResourceRecord, ResourceType};
pub use selection::{Choice, FilterSelection, ALL_LABEL};
