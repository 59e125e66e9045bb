//! Book model for results returned by a remote lookup.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder author used when a document lists none
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Placeholder title used when a document has none
pub const UNTITLED: &str = "Untitled";

/// First publication year of a book, when the provider knows it
///
/// Serialized as a number, or as the string `"unknown"` for the sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookYear {
    Known(i32),
    #[default]
    Unknown,
}

impl BookYear {
    /// Returns the year as a number, if known
    pub fn value(&self) -> Option<i32> {
        match self {
            BookYear::Known(year) => Some(*year),
            BookYear::Unknown => None,
        }
    }
}

impl From<Option<i32>> for BookYear {
    fn from(value: Option<i32>) -> Self {
        value.map_or(BookYear::Unknown, BookYear::Known)
    }
}

impl std::fmt::Display for BookYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookYear::Known(year) => write!(f, "{}", year),
            BookYear::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for BookYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BookYear::Known(year) => serializer.serialize_i32(*year),
            BookYear::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for BookYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(year) => Ok(BookYear::Known(year)),
            Raw::Text(text) if text.eq_ignore_ascii_case("unknown") => Ok(BookYear::Unknown),
            Raw::Text(text) => text
                .parse()
                .map(BookYear::Known)
                .map_err(|_| de::Error::custom(format!("invalid year \"{}\"", text))),
        }
    }
}

/// A book found by a remote lookup, normalized across providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBookRecord {
    /// Book title
    pub title: String,

    /// Primary author, or [`UNKNOWN_AUTHOR`]
    pub author: String,

    /// First publication year
    pub year: BookYear,

    /// Direct download URL for publicly available scans
    pub download_link: Option<String>,

    /// Provider page for the book, set only when there is no download link
    pub online_link: Option<String>,

    /// Provider cover image identifier
    pub cover_id: Option<u64>,
}

impl RemoteBookRecord {
    /// Create a record with a title and defaults for everything else
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: UNKNOWN_AUTHOR.to_string(),
            year: BookYear::Unknown,
            download_link: None,
            online_link: None,
            cover_id: None,
        }
    }

    /// Set the author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the first publication year
    pub fn year(mut self, year: i32) -> Self {
        self.year = BookYear::Known(year);
        self
    }

    /// Set the download link
    pub fn download_link(mut self, url: impl Into<String>) -> Self {
        self.download_link = Some(url.into());
        self
    }

    /// Set the online view link
    pub fn online_link(mut self, url: impl Into<String>) -> Self {
        self.online_link = Some(url.into());
        self
    }

    /// Set the cover identifier
    pub fn cover_id(mut self, cover_id: u64) -> Self {
        self.cover_id = Some(cover_id);
        self
    }

    /// The link a reader should follow: download if available, else online view
    pub fn best_link(&self) -> Option<&str> {
        self.download_link
            .as_deref()
            .or(self.online_link.as_deref())
    }

    /// Check if the book can be downloaded directly
    pub fn is_downloadable(&self) -> bool {
        self.download_link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_defaults() {
        let book = RemoteBookRecord::new("The Art of Electronics");
        assert_eq!(book.author, "Unknown");
        assert_eq!(book.year, BookYear::Unknown);
        assert!(book.best_link().is_none());
        assert!(!book.is_downloadable());
    }

    #[test]
    fn test_best_link_prefers_download() {
        let book = RemoteBookRecord::new("Control Systems")
            .download_link("https://archive.org/download/x/x.pdf")
            .online_link("https://openlibrary.org/works/OL1W");
        assert_eq!(book.best_link(), Some("https://archive.org/download/x/x.pdf"));

        let online = RemoteBookRecord::new("Control Systems")
            .online_link("https://openlibrary.org/works/OL1W");
        assert_eq!(online.best_link(), Some("https://openlibrary.org/works/OL1W"));
    }

    #[test]
    fn test_year_serialization() {
        let known = serde_json::to_value(BookYear::Known(1998)).unwrap();
        assert_eq!(known, serde_json::json!(1998));

        let unknown = serde_json::to_value(BookYear::Unknown).unwrap();
        assert_eq!(unknown, serde_json::json!("unknown"));

        let parsed: BookYear = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(parsed, BookYear::Unknown);
        assert_eq!(BookYear::Known(2001).to_string(), "2001");
    }
}
