//! Open Library book search source.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::config::RemoteConfig;
use crate::models::{BookYear, RemoteBookRecord, UNKNOWN_AUTHOR, UNTITLED};
use crate::sources::{BookSource, SourceError};
use crate::utils::HttpClient;

/// Open Library book source
///
/// Uses the public `search.json` endpoint. No authentication is required.
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    http: HttpClient,
    base_url: String,
    site_base: String,
    archive_base: String,
    result_cap: usize,
}

impl OpenLibrarySource {
    /// Create a source with the default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&RemoteConfig::default())
    }

    /// Create a source from the remote lookup settings
    pub fn from_config(config: &RemoteConfig) -> Result<Self, SourceError> {
        let http = HttpClient::from_config(config)?;
        Self::with_client(http, config)
    }

    /// Create a source that reuses an existing HTTP client
    pub fn with_client(http: HttpClient, config: &RemoteConfig) -> Result<Self, SourceError> {
        // Reject unusable base URLs up front rather than on every lookup
        Url::parse(&config.base_url)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_base: config.site_base.trim_end_matches('/').to_string(),
            archive_base: config.archive_base.trim_end_matches('/').to_string(),
            result_cap: config.result_cap,
        })
    }

    /// Maximum number of books kept from one response
    pub fn result_cap(&self) -> usize {
        self.result_cap
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search.json?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            self.result_cap
        )
    }

    /// Map one search document into a book record
    fn parse_doc(&self, doc: OLDoc) -> RemoteBookRecord {
        let download_link = if doc.is_public() {
            doc.ia
                .iter()
                .find(|id| !id.is_empty())
                .map(|id| format!("{}/{}/{}.pdf", self.archive_base, id, id))
        } else {
            None
        };

        let online_link = match (&download_link, &doc.key) {
            (None, Some(key)) if !key.is_empty() => {
                let separator = if key.starts_with('/') { "" } else { "/" };
                Some(format!("{}{}{}", self.site_base, separator, key))
            }
            _ => None,
        };

        RemoteBookRecord {
            title: doc.title.unwrap_or_else(|| UNTITLED.to_string()),
            author: doc
                .author_name
                .into_iter()
                .next()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            year: BookYear::from(doc.first_publish_year),
            download_link,
            online_link,
            cover_id: doc.cover_i,
        }
    }
}

#[async_trait]
impl BookSource for OpenLibrarySource {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    async fn try_search(&self, query: &str) -> Result<Vec<RemoteBookRecord>, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.search_url(query);
        tracing::debug!(%url, "searching Open Library");

        let response = self.http.client().get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Api {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let data: OLSearchResponse = serde_json::from_str(&body)?;

        let books: Vec<RemoteBookRecord> = data
            .docs
            .into_iter()
            .take(self.result_cap)
            .map(|doc| self.parse_doc(doc))
            .collect();

        tracing::debug!(
            found = data.num_found.unwrap_or_default(),
            kept = books.len(),
            "Open Library search finished"
        );

        Ok(books)
    }
}

// ===== Open Library API Types =====

#[derive(Debug, Deserialize)]
struct OLSearchResponse {
    docs: Vec<OLDoc>,
    #[serde(rename = "numFound", default)]
    num_found: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct OLDoc {
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    first_publish_year: Option<i32>,
    #[serde(default)]
    ia: Vec<String>,
    ebook_access: Option<String>,
    #[serde(default)]
    public_scan_b: bool,
    key: Option<String>,
    cover_i: Option<u64>,
}

impl OLDoc {
    fn is_public(&self) -> bool {
        self.public_scan_b || self.ebook_access.as_deref() == Some("public")
    }
}
