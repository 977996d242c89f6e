//! Database layer for newsdesk
//!
//! Handles SQLite persistence for articles, including soft deletion.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`articles`] — Article CRUD and soft-delete queries
//!
//! ## Record mapping
//!
//! [`ArticleRecord`] is the storage representation of an [`Article`]: same
//! fields, plus a soft-delete flag and a unix-seconds timestamp. The mapping
//! is bidirectional and total — `Article::from(record)` drops the flag on the
//! read path, [`ArticleRecord::from_article`] supplies it on the write path.

use crate::types::{Article, ArticleId};
use sqlx::{FromRow, sqlite::SqlitePool};

mod articles;
mod migrations;

/// Article record from database
///
/// Carries the soft-delete flag; rows are retained in storage after deletion
/// and only filtered out of the active view.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ArticleRecord {
    /// Stable unique identifier (primary key)
    pub id: ArticleId,
    /// Article title
    pub title: String,
    /// Author name
    pub author: String,
    /// Creation timestamp as unix seconds
    pub created_at: i64,
    /// Link to the full story
    pub url: Option<String>,
    /// Soft-delete flag (0 = live, 1 = deleted)
    pub deleted: i32,
}

impl ArticleRecord {
    /// Build a record from a domain article and the soft-delete flag
    ///
    /// The flag is supplied separately because it never appears on the
    /// domain entity.
    pub fn from_article(article: &Article, deleted: bool) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            author: article.author.clone(),
            created_at: article.created.timestamp(),
            url: article.url.clone(),
            deleted: i32::from(deleted),
        }
    }

    /// Whether this record is soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted != 0
    }
}

impl From<ArticleRecord> for Article {
    fn from(record: ArticleRecord) -> Self {
        use chrono::{TimeZone, Utc};

        Article {
            id: record.id,
            title: record.title,
            author: record.author,
            created: Utc
                .timestamp_opt(record.created_at, 0)
                .single()
                .unwrap_or_else(Utc::now),
            url: record.url,
        }
    }
}

/// Database handle for newsdesk
pub struct Database {
    pool: SqlitePool,
}
