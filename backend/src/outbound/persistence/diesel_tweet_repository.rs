//! PostgreSQL-backed `TweetRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `TweetRepository` port. Writes use
//! `RETURNING` so the created or mutated record comes back in the same
//! round trip; misses surface as `None`/`false` for the handlers to turn
//! into not-found errors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{TweetPersistenceError, TweetRepository};
use crate::domain::{Tweet, TweetId};

use super::models::{NewTweetRow, TweetRow, TweetUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tweets;

/// Diesel-backed implementation of the `TweetRepository` port.
#[derive(Clone)]
pub struct DieselTweetRepository {
    pool: DbPool,
}

impl DieselTweetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> TweetPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TweetPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> TweetPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TweetPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => TweetPersistenceError::query("database error"),
        DieselError::NotFound => TweetPersistenceError::query("record not found"),
        _ => TweetPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain tweet.
fn row_to_tweet(row: TweetRow) -> Tweet {
    Tweet {
        id: TweetId::new(row.id),
        message: row.message,
    }
}

#[async_trait]
impl TweetRepository for DieselTweetRepository {
    async fn find_all(&self) -> Result<Vec<Tweet>, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TweetRow> = tweets::table
            .order(tweets::id.asc())
            .select(TweetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_tweet).collect())
    }

    async fn find_by_id(&self, id: TweetId) -> Result<Option<Tweet>, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TweetRow> = tweets::table
            .filter(tweets::id.eq(id.as_i64()))
            .select(TweetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_tweet))
    }

    async fn create(&self, message: &str) -> Result<Tweet, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TweetRow = diesel::insert_into(tweets::table)
            .values(NewTweetRow { message })
            .returning(TweetRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_tweet(row))
    }

    async fn update_message(
        &self,
        id: TweetId,
        message: &str,
    ) -> Result<Option<Tweet>, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TweetRow> = diesel::update(tweets::table.filter(tweets::id.eq(id.as_i64())))
            .set(TweetUpdate { message })
            .returning(TweetRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_tweet))
    }

    async fn delete(&self, id: TweetId) -> Result<bool, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(tweets::table.filter(tweets::id.eq(id.as_i64())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
