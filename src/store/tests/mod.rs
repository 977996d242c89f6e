use super::*;
use crate::config::Config;
use crate::error::{Error, SourceError};
use crate::types::ArticleId;
use chrono::{TimeZone, Utc};
use futures::StreamExt;
use std::collections::VecDeque;
use tempfile::NamedTempFile;

/// Feed fake that replays a scripted sequence of responses, then empty lists.
struct ScriptedSource {
    responses: tokio::sync::Mutex<VecDeque<crate::Result<Vec<Article>>>>,
}

impl ScriptedSource {
    fn new(responses: Vec<crate::Result<Vec<Article>>>) -> Arc<Self> {
        Arc::new(Self {
            responses: tokio::sync::Mutex::new(responses.into()),
        })
    }
}

#[async_trait::async_trait]
impl ArticleSource for ScriptedSource {
    async fn fetch_latest(&self) -> crate::Result<Vec<Article>> {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn article(id: &str, created_at: i64) -> Article {
    Article {
        id: id.into(),
        title: format!("Article {}", id),
        author: "tester".to_string(),
        created: Utc.timestamp_opt(created_at, 0).single().unwrap(),
        url: Some(format!("https://example.com/{}", id)),
    }
}

fn ids(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.id.as_str()).collect()
}

fn test_config(db_file: &NamedTempFile) -> Config {
    let mut config = Config::default();
    config.persistence.database_path = db_file.path().to_path_buf();
    config
}

async fn scripted_store(
    db_file: &NamedTempFile,
    responses: Vec<crate::Result<Vec<Article>>>,
) -> ArticleStore {
    ArticleStore::with_source(test_config(db_file), ScriptedSource::new(responses))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_fetch_appends_and_publishes() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(
        &db_file,
        vec![
            Ok(vec![article("a1", 300), article("a2", 200)]),
            Ok(vec![article("a3", 100)]),
        ],
    )
    .await;

    assert!(store.articles().is_empty());

    let stored = store.fetch().await.unwrap();
    assert_eq!(stored, 2);
    assert_eq!(ids(&store.articles()), vec!["a1", "a2"]);

    // Second fetch keeps everything already held and adds the new item
    let stored = store.fetch().await.unwrap();
    assert_eq!(stored, 1);
    assert_eq!(ids(&store.articles()), vec!["a1", "a2", "a3"]);

    store.close().await;
}

#[tokio::test]
async fn test_fetch_notifies_subscribers() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(&db_file, vec![Ok(vec![article("a1", 100)])]).await;

    let mut rx = store.subscribe();
    assert!(rx.borrow().is_empty());

    store.fetch().await.unwrap();

    rx.changed().await.unwrap();
    assert_eq!(ids(&rx.borrow()), vec!["a1"]);

    store.close().await;
}

#[tokio::test]
async fn test_fetch_failure_leaves_snapshot_unchanged() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(
        &db_file,
        vec![
            Ok(vec![article("a1", 100)]),
            Err(Error::Source(SourceError::RequestFailed { status: 503 })),
        ],
    )
    .await;

    store.fetch().await.unwrap();
    let rx = store.subscribe();

    let err = store.fetch().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Source(SourceError::RequestFailed { status: 503 })
    ));

    // Error propagated, nothing was published
    assert_eq!(ids(&store.articles()), vec!["a1"]);
    assert!(!rx.has_changed().unwrap());

    store.close().await;
}

#[tokio::test]
async fn test_delete_removes_article() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(
        &db_file,
        vec![Ok(vec![
            article("a1", 300),
            article("a2", 200),
            article("a3", 100),
        ])],
    )
    .await;

    store.fetch().await.unwrap();

    store.delete(&article("a2", 200)).await.unwrap();
    assert_eq!(ids(&store.articles()), vec!["a1", "a3"]);

    store.close().await;
}

#[tokio::test]
async fn test_delete_absent_is_silent_noop() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(
        &db_file,
        vec![Ok(vec![article("a1", 300), article("a3", 100)])],
    )
    .await;

    store.fetch().await.unwrap();
    let rx = store.subscribe();

    store.delete(&article("a9", 50)).await.unwrap();

    // Snapshot unchanged and no spurious wakeup for subscribers
    assert_eq!(ids(&store.articles()), vec!["a1", "a3"]);
    assert!(!rx.has_changed().unwrap());

    store.close().await;
}

#[tokio::test]
async fn test_refetch_does_not_resurrect_deleted() {
    let db_file = NamedTempFile::new().unwrap();
    let batch = vec![article("a1", 300), article("a2", 200)];
    let store = scripted_store(&db_file, vec![Ok(batch.clone()), Ok(batch)]).await;

    store.fetch().await.unwrap();
    store.delete(&article("a2", 200)).await.unwrap();

    // The feed still carries a2, but the user deleted it
    let stored = store.fetch().await.unwrap();
    assert_eq!(stored, 0);
    assert_eq!(ids(&store.articles()), vec!["a1"]);

    store.close().await;
}

#[tokio::test]
async fn test_stream_yields_current_snapshot_first() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(&db_file, vec![Ok(vec![article("a1", 100)])]).await;

    store.fetch().await.unwrap();

    // A late subscriber sees the latest state immediately
    let mut snapshots = store.stream();
    let first = snapshots.next().await.unwrap();
    assert_eq!(ids(&first), vec!["a1"]);

    store.close().await;
}

#[tokio::test]
async fn test_stream_observes_mutations() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(&db_file, vec![Ok(vec![article("a1", 100)])]).await;

    let mut snapshots = store.stream();
    assert!(snapshots.next().await.unwrap().is_empty());

    store.fetch().await.unwrap();
    assert_eq!(ids(&snapshots.next().await.unwrap()), vec!["a1"]);

    store.delete(&article("a1", 100)).await.unwrap();
    assert!(snapshots.next().await.unwrap().is_empty());

    store.close().await;
}

#[tokio::test]
async fn test_published_list_has_no_duplicate_ids() {
    let db_file = NamedTempFile::new().unwrap();
    let batch = vec![article("a1", 300), article("a1", 300), article("a2", 200)];
    let store = scripted_store(&db_file, vec![Ok(batch.clone()), Ok(batch)]).await;

    store.fetch().await.unwrap();
    store.fetch().await.unwrap();

    let snapshot = store.articles();
    let mut seen: Vec<&ArticleId> = snapshot.iter().map(|a| &a.id).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), snapshot.len());
    assert_eq!(ids(&snapshot), vec!["a1", "a2"]);

    store.close().await;
}

#[tokio::test]
async fn test_restore_publishes_persisted_articles() {
    let db_file = NamedTempFile::new().unwrap();

    let store = scripted_store(
        &db_file,
        vec![Ok(vec![article("a1", 300), article("a2", 200)])],
    )
    .await;
    store.fetch().await.unwrap();
    store.delete(&article("a2", 200)).await.unwrap();
    store.close().await;

    // A fresh store over the same database starts from persisted state
    let reopened = scripted_store(&db_file, vec![]).await;
    assert_eq!(ids(&reopened.articles()), vec!["a1"]);

    reopened.close().await;
}

#[tokio::test]
async fn test_concurrent_mutations_are_serialized() {
    let db_file = NamedTempFile::new().unwrap();
    let store = scripted_store(
        &db_file,
        vec![
            Ok(vec![article("a1", 300), article("a2", 200)]),
            Ok(vec![article("a3", 100)]),
        ],
    )
    .await;

    store.fetch().await.unwrap();

    // Fire a fetch and a delete at the same time; both must land
    let fetching = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch().await })
    };
    let deleting = {
        let store = store.clone();
        tokio::spawn(async move { store.delete(&article("a2", 200)).await })
    };

    fetching.await.unwrap().unwrap();
    deleting.await.unwrap().unwrap();

    assert_eq!(ids(&store.articles()), vec!["a1", "a3"]);

    store.close().await;
}
