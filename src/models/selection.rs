//! Filter selection models for narrowing the static catalog.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Category, Level, ResourceType};

/// Label used by every selector to mean "no constraint"
pub const ALL_LABEL: &str = "All";

/// A single selector value: either unconstrained or pinned to one value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Choice<T> {
    /// Whether this selector lets every value through
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// Returns the pinned value, if any
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl<T: PartialEq> Choice<T> {
    /// Check whether `value` passes this selector
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Choice::All, Choice::Only)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::All => write!(f, "{}", ALL_LABEL),
            Choice::Only(value) => write!(f, "{}", value),
        }
    }
}

impl<T: FromStr> FromStr for Choice<T> {
    type Err = T::Err;

    /// "All" (any case) or an empty string parse to [`Choice::All`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_LABEL) {
            Ok(Choice::All)
        } else {
            trimmed.parse().map(Choice::Only)
        }
    }
}

/// The query text and selector values currently applied to the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Free-text query matched against titles and tags
    pub query: String,

    /// Category selector
    pub category: Choice<Category>,

    /// File type selector
    #[serde(rename = "file_type")]
    pub kind: Choice<ResourceType>,

    /// Academic level selector
    pub level: Choice<Level>,

    /// Year selector, compared textually against the record year
    pub year: Choice<String>,
}

impl FilterSelection {
    /// Create a selection with only a query set
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the query text
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Pin the category selector
    pub fn category(mut self, category: Category) -> Self {
        self.category = Choice::Only(category);
        self
    }

    /// Pin the file type selector
    pub fn kind(mut self, kind: ResourceType) -> Self {
        self.kind = Choice::Only(kind);
        self
    }

    /// Pin the level selector
    pub fn level(mut self, level: Level) -> Self {
        self.level = Choice::Only(level);
        self
    }

    /// Pin the year selector
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Choice::Only(year.into());
        self
    }

    /// The query with surrounding whitespace removed
    pub fn normalized_query(&self) -> &str {
        self.query.trim()
    }

    /// Whether every selector is unconstrained and the query is blank
    pub fn is_unconstrained(&self) -> bool {
        self.normalized_query().is_empty()
            && self.category.is_all()
            && self.kind.is_all()
            && self.level.is_all()
            && self.year.is_all()
    }

    /// Restore the all-pass selection
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
