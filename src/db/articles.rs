//! Article CRUD and soft-delete operations.

use crate::error::DatabaseError;
use crate::types::ArticleId;
use crate::{Error, Result};

use super::{ArticleRecord, Database};

impl Database {
    /// Insert articles that are not yet known, skipping existing ids
    ///
    /// Rows whose id already exists — including soft-deleted ones — are left
    /// untouched, so an article the user deleted does not come back on the
    /// next fetch. Returns the number of rows actually inserted.
    ///
    /// Automatically chunks the input to stay within SQLite's bind variable
    /// limit (6 variables per article, chunked to max 166 articles per INSERT).
    pub async fn insert_new_articles(&self, records: &[ArticleRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        // SQLite default SQLITE_MAX_VARIABLE_NUMBER is 999.
        // Each article uses 6 bind variables, so max 166 articles per batch.
        const MAX_ARTICLES_PER_BATCH: usize = 166;

        let mut inserted = 0;

        for chunk in records.chunks(MAX_ARTICLES_PER_BATCH) {
            let mut query_builder = sqlx::QueryBuilder::new(
                "INSERT INTO articles (id, title, author, created_at, url, deleted) ",
            );

            query_builder.push_values(chunk, |mut b, record| {
                b.push_bind(&record.id)
                    .push_bind(&record.title)
                    .push_bind(&record.author)
                    .push_bind(record.created_at)
                    .push_bind(&record.url)
                    .push_bind(record.deleted);
            });
            query_builder.push(" ON CONFLICT(id) DO NOTHING");

            let query = query_builder.build();
            let result = query.execute(&self.pool).await.map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to insert articles batch: {}",
                    e
                )))
            })?;

            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    /// Get all live articles, newest first
    ///
    /// Soft-deleted rows are excluded. Ties on the timestamp are broken by id
    /// so the ordering is stable.
    pub async fn get_active_articles(&self) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query_as::<_, ArticleRecord>(
            r#"
            SELECT id, title, author, created_at, url, deleted
            FROM articles
            WHERE deleted = 0
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get active articles: {}",
                e
            )))
        })?;

        Ok(rows)
    }

    /// Get an article by id, whether live or soft-deleted
    pub async fn get_article(&self, id: &ArticleId) -> Result<Option<ArticleRecord>> {
        let row = sqlx::query_as::<_, ArticleRecord>(
            r#"
            SELECT id, title, author, created_at, url, deleted
            FROM articles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get article: {}",
                e
            )))
        })?;

        Ok(row)
    }

    /// Soft-delete an article by id
    ///
    /// The row is flagged rather than removed. Returns false when no live row
    /// matched (unknown id or already deleted) — callers treat that as a
    /// no-op, not an error.
    pub async fn mark_deleted(&self, id: &ArticleId) -> Result<bool> {
        let result = sqlx::query("UPDATE articles SET deleted = 1 WHERE id = ? AND deleted = 0")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to mark article deleted: {}",
                    e
                )))
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Get total article count, including soft-deleted rows
    pub async fn count_articles(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to count articles: {}",
                    e
                )))
            })?;

        Ok(count)
    }

    /// Get live article count
    pub async fn count_active_articles(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE deleted = 0")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to count active articles: {}",
                    e
                )))
            })?;

        Ok(count)
    }
}
