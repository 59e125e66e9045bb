//! Conjunctive filtering and tag suggestions over the static catalog.

use crate::models::{FilterSelection, ResourceRecord};

/// Suggestions shown while the query is blank
pub const DEFAULT_SUGGESTIONS: [&str; 3] = [
    "robotics control",
    "MATLAB simulation",
    "embedded C optimization",
];

/// Maximum number of tag suggestions for a non-blank query
pub const MAX_SUGGESTIONS: usize = 4;

/// Check whether a single record passes every selector in `selection`.
///
/// The query is trimmed and compared case-insensitively as a substring of the
/// title or of any tag. Year is compared textually.
pub fn matches(record: &ResourceRecord, selection: &FilterSelection) -> bool {
    let query = selection.normalized_query().to_lowercase();

    let matches_query = query.is_empty()
        || record.title.to_lowercase().contains(&query)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query));

    let matches_year = match selection.year.as_only() {
        None => true,
        Some(year) => record.year.to_string() == year.trim(),
    };

    matches_query
        && selection.category.admits(&record.category)
        && selection.kind.admits(&record.kind)
        && selection.level.admits(&record.level)
        && matches_year
}

/// Return the records of `catalog` that satisfy `selection`, in source order.
pub fn filter<'a>(
    catalog: &'a [ResourceRecord],
    selection: &FilterSelection,
) -> Vec<&'a ResourceRecord> {
    catalog
        .iter()
        .filter(|record| matches(record, selection))
        .collect()
}

/// Tags from across the catalog that contain `query`, capped at [`MAX_SUGGESTIONS`].
///
/// A blank query yields [`DEFAULT_SUGGESTIONS`].
pub fn suggestions(catalog: &[ResourceRecord], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    }

    catalog
        .iter()
        .flat_map(|record| record.tags.iter())
        .filter(|tag| tag.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}
