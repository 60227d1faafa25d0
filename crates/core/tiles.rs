//! Scraper for the tile server's HTML index page.
//!
//! The index lists one tile layer per `<p>` element; the entries are the
//! text of those paragraphs.

use crate::config::TilesConfig;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector"));

#[derive(Debug, Error)]
pub enum TileIndexError {
    #[error("Tile index URL is not configured")]
    NotConfigured,

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Failed to fetch tile index {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for one tile index page.
#[derive(Clone)]
pub struct TileIndex {
    url: String,
    client: reqwest::Client,
}

impl TileIndex {
    pub fn new(url: impl Into<String>, timeout: std::time::Duration) -> Result<Self, TileIndexError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TileIndexError::Client)?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn from_config(config: &TilesConfig) -> Result<Self, TileIndexError> {
        let url = config
            .index_url
            .as_deref()
            .ok_or(TileIndexError::NotConfigured)?;
        Self::new(url, config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the index page and return its paragraph texts in document order.
    pub async fn entries(&self) -> Result<Vec<String>, TileIndexError> {
        let fetch_error = |source| TileIndexError::Fetch {
            url: self.url.clone(),
            source,
        };

        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_error)?
            .text()
            .await
            .map_err(fetch_error)?;

        let entries = extract_paragraphs(&body);
        log::debug!("tiles: {} entries from {}", entries.len(), self.url);
        Ok(entries)
    }
}

/// Text content of every `<p>` element, nested markup flattened.
///
/// ```
/// use geostack::tiles::extract_paragraphs;
///
/// let html = "<html><body><p>osm</p><div><p>crane_<b>heatmap</b></p></div></body></html>";
/// assert_eq!(extract_paragraphs(html), vec!["osm", "crane_heatmap"]);
/// ```
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    Html::parse_document(html)
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect()
}
