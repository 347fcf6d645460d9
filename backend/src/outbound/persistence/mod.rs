//! Diesel persistence adapter for the tweet store.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub mod diesel_tweet_repository;
mod models;
pub mod pool;
mod schema;

pub use diesel_tweet_repository::DieselTweetRepository;
pub use pool::{DbPool, PoolSettings};

/// Migrations compiled into the binary from the crate's `migrations/`
/// directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Failure to bring the schema up to date at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("database migration failed: {message}")]
pub struct MigrationError {
    message: String,
}

impl MigrationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Apply any pending migrations before the server takes traffic.
///
/// The migration harness is synchronous, so it runs on a blocking thread
/// over a dedicated connection rather than a pooled one.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)
            .map_err(|err| MigrationError::new(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| MigrationError::new(err.to_string()))
    })
    .await
    .map_err(|err| MigrationError::new(err.to_string()))?
}
