//! The article store: authoritative article collection and snapshot stream.
//!
//! [`ArticleStore`] owns the current article list. Consumers subscribe via
//! [`ArticleStore::stream`] and receive the full list as a snapshot — the
//! latest state immediately on subscription, then a new snapshot after every
//! successful mutation. `fetch` and `delete` are the only mutations and are
//! serialized against each other, so concurrent callers cannot lose updates.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::{ArticleRecord, Database};
use crate::error::Result;
use crate::source::{ArticleSource, HttpArticleSource};
use crate::types::Article;

/// Article store instance (cloneable - all fields are Arc-wrapped or channels)
///
/// The store is the single owner of the article collection. Storage deletes
/// are soft (the row is flagged and retained); the published view only ever
/// contains live articles, with no duplicate ids.
#[derive(Clone)]
pub struct ArticleStore {
    /// Database instance for persistence (wrapped in Arc for sharing across tasks)
    db: Arc<Database>,
    /// Article feed (trait object for pluggable implementations)
    source: Arc<dyn ArticleSource>,
    /// Snapshot channel sender; holds the latest published list
    snapshot_tx: watch::Sender<Vec<Article>>,
    /// Serializes fetch/delete so read-modify-publish cycles cannot interleave
    write_lock: Arc<Mutex<()>>,
}

impl ArticleStore {
    /// Create a new article store backed by the configured HTTP feed
    ///
    /// Opens (or creates) the database, runs migrations, and publishes the
    /// persisted article set as the initial snapshot.
    pub async fn new(config: Config) -> Result<Self> {
        let source = Arc::new(HttpArticleSource::new(&config.source)?);
        Self::with_source(config, source).await
    }

    /// Create a store with a custom article source
    ///
    /// Useful for alternative feeds and for tests that script the source.
    pub async fn with_source(config: Config, source: Arc<dyn ArticleSource>) -> Result<Self> {
        let db = Database::new(&config.persistence.database_path).await?;

        let initial = Self::load_active(&db).await?;
        info!(count = initial.len(), "Restored article list from database");

        let (snapshot_tx, _rx) = watch::channel(initial);

        Ok(Self {
            db: Arc::new(db),
            source,
            snapshot_tx,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Subscribe to article list snapshots as a `Stream`
    ///
    /// Yields the current list immediately, then the full updated list after
    /// every mutation. Multiple subscribers are supported; delivery is
    /// latest-state-wins, so a slow consumer sees the newest list rather than
    /// every intermediate one.
    pub fn stream(&self) -> WatchStream<Vec<Article>> {
        WatchStream::new(self.snapshot_tx.subscribe())
    }

    /// Subscribe to article list snapshots as a raw watch receiver
    ///
    /// For callers that prefer `changed()`/`borrow()` over a `Stream`.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Article>> {
        self.snapshot_tx.subscribe()
    }

    /// Get the current article list snapshot
    pub fn articles(&self) -> Vec<Article> {
        self.snapshot_tx.borrow().clone()
    }

    /// Fetch new articles from the feed and publish the updated list
    ///
    /// New articles are stored with the soft-delete flag clear; ids that are
    /// already known — including soft-deleted ones — are skipped, so deleted
    /// articles do not come back on refresh. Publishes only after the fetch
    /// and the storage write both succeed; on failure the error propagates
    /// and the current snapshot stays as it was.
    ///
    /// Returns the number of newly stored articles.
    pub async fn fetch(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let fetched = self.source.fetch_latest().await?;

        let records: Vec<ArticleRecord> = fetched
            .iter()
            .map(|article| ArticleRecord::from_article(article, false))
            .collect();
        let stored = self.db.insert_new_articles(&records).await?;

        let snapshot = Self::load_active(&self.db).await?;
        info!(
            fetched = fetched.len(),
            stored,
            total = snapshot.len(),
            "Fetched new articles"
        );
        self.snapshot_tx.send_replace(snapshot);

        Ok(stored as usize)
    }

    /// Delete an article and publish the updated list
    ///
    /// The record is soft-deleted in storage (flagged, not removed) and
    /// dropped from the published view. Deleting an article that is not in
    /// the list is a silent no-op: nothing is written and no snapshot is
    /// published.
    pub async fn delete(&self, article: &Article) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let removed = self.db.mark_deleted(&article.id).await?;
        if !removed {
            debug!(article_id = %article.id, "Delete requested for unknown article, ignoring");
            return Ok(());
        }

        let snapshot = Self::load_active(&self.db).await?;
        info!(
            article_id = %article.id,
            remaining = snapshot.len(),
            "Deleted article"
        );
        self.snapshot_tx.send_replace(snapshot);

        Ok(())
    }

    /// Close the store, releasing the database pool
    pub async fn close(&self) {
        self.db.close().await;
    }

    /// Load the live article set from storage as domain values
    async fn load_active(db: &Database) -> Result<Vec<Article>> {
        let records = db.get_active_articles().await?;
        Ok(records.into_iter().map(Article::from).collect())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
