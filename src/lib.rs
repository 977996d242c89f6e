//! # newsdesk
//!
//! Embeddable article store for news-reading applications.
//!
//! ## Design Philosophy
//!
//! newsdesk is designed to be:
//! - **Library-first** - No UI or CLI, purely a Rust crate for embedding
//! - **Snapshot-driven** - Consumers subscribe to full-list snapshots, no polling required
//! - **Offline-friendly** - Articles persist in SQLite; deletes survive refreshes
//! - **Sensible defaults** - Works out of the box with zero configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use newsdesk::{ArticleStore, Config};
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ArticleStore::new(Config::default()).await?;
//!
//!     // Subscribe to article list snapshots
//!     let mut snapshots = store.stream();
//!     tokio::spawn(async move {
//!         while let Some(articles) = snapshots.next().await {
//!             println!("{} articles", articles.len());
//!         }
//!     });
//!
//!     // Pull the latest articles from the feed
//!     store.fetch().await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Article feed sources
pub mod source;
/// Article store and snapshot stream
pub mod store;
/// Core domain types
pub mod types;

// Re-export commonly used types
pub use config::{Config, PersistenceConfig, SourceConfig};
pub use db::{ArticleRecord, Database};
pub use error::{DatabaseError, Error, Result, SourceError};
pub use source::{ArticleSource, HttpArticleSource};
pub use store::ArticleStore;
pub use types::{Article, ArticleId};
