//! Article feed sources.
//!
//! The store pulls new articles through the [`ArticleSource`] seam. The
//! default implementation, [`HttpArticleSource`], queries an Algolia-style
//! search endpoint and maps its JSON hits into domain articles. Alternative
//! implementations (fixtures, other feeds) can be plugged in at store
//! construction.

use crate::config::SourceConfig;
use crate::error::{Error, Result, SourceError};
use crate::types::{Article, ArticleId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// A provider of new articles for the store
///
/// Implementations fetch whatever the feed currently considers its latest
/// items; de-duplication against already-stored articles is the store's job,
/// not the source's.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch the latest articles from the feed
    async fn fetch_latest(&self) -> Result<Vec<Article>>;
}

/// One hit from the search endpoint
///
/// Story comments carry the parent story's title/url under `story_*`, plain
/// stories carry their own under `title`/`url`; either may be missing.
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    story_title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    story_url: Option<String>,
}

/// Response envelope from the search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

impl SearchHit {
    /// Map a feed hit into a domain article
    ///
    /// Returns `None` for hits without a usable title. Candidate URLs that do
    /// not parse are degraded to `None` rather than stored as junk.
    fn into_article(self) -> Option<Article> {
        let title = self
            .story_title
            .or(self.title)
            .filter(|t| !t.trim().is_empty())?;

        let url = self
            .story_url
            .or(self.url)
            .and_then(|raw| normalize_url(&raw));

        Some(Article {
            id: ArticleId::from(self.object_id),
            title,
            author: self.author.unwrap_or_default(),
            created: self.created_at,
            url,
        })
    }
}

/// Validate and normalize a candidate article link
fn normalize_url(raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
            Some(parsed.to_string())
        }
        _ => None,
    }
}

/// HTTP-backed article source
///
/// Queries the configured search endpoint with `query` and `hitsPerPage`
/// parameters and decodes the JSON `hits` array.
pub struct HttpArticleSource {
    /// HTTP client for fetching the feed
    http_client: reqwest::Client,
    /// Feed search endpoint
    endpoint: String,
    /// Search query sent on every fetch
    query: String,
    /// Maximum number of items requested per fetch
    page_size: u32,
}

impl HttpArticleSource {
    /// Create a new HTTP article source from configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            query: config.query.clone(),
            page_size: config.page_size,
        })
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let page_size = self.page_size.to_string();

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("query", self.query.as_str()),
                ("hitsPerPage", page_size.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Source(SourceError::RequestFailed {
                status: response.status().as_u16(),
            }));
        }

        let payload: SearchResponse = response.json().await.map_err(|e| {
            Error::Source(SourceError::InvalidPayload(format!(
                "Failed to decode feed response: {}",
                e
            )))
        })?;

        let received = payload.hits.len();
        let articles: Vec<Article> = payload
            .hits
            .into_iter()
            .filter_map(|hit| {
                let hit_id = hit.object_id.clone();
                let article = hit.into_article();
                if article.is_none() {
                    debug!(article_id = %hit_id, "Skipping feed item without usable title");
                }
                article
            })
            .collect();

        debug!(
            received,
            usable = articles.len(),
            "Fetched latest articles from feed"
        );

        Ok(articles)
    }
}
