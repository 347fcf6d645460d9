//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! The sole port here is the tweet store; adapters map their failures into
//! the strongly typed [`TweetPersistenceError`] variants instead of
//! returning `anyhow::Result`.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use super::tweet::{Tweet, TweetId};

/// Persistence errors raised by [`TweetRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TweetPersistenceError {
    /// Repository connection could not be established.
    #[error("tweet store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("tweet store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl TweetPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for tweet persistence.
///
/// The store owns every persisted instance; handlers hold only transient
/// copies for the duration of a request. Update and delete report a miss as
/// `None`/`false` so callers can raise the uniform not-found error.
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Fetch every tweet in the store's return order (ascending id).
    async fn find_all(&self) -> Result<Vec<Tweet>, TweetPersistenceError>;

    /// Fetch one tweet by identifier.
    async fn find_by_id(&self, id: TweetId) -> Result<Option<Tweet>, TweetPersistenceError>;

    /// Insert a new tweet and return it with its assigned identifier.
    async fn create(&self, message: &str) -> Result<Tweet, TweetPersistenceError>;

    /// Replace the message of an existing tweet, returning the mutated
    /// record, or `None` when no record matches.
    async fn update_message(
        &self,
        id: TweetId,
        message: &str,
    ) -> Result<Option<Tweet>, TweetPersistenceError>;

    /// Remove a tweet, reporting whether a record was actually deleted.
    async fn delete(&self, id: TweetId) -> Result<bool, TweetPersistenceError>;
}

#[derive(Debug, Default)]
struct FixtureState {
    tweets: Vec<Tweet>,
    last_id: i64,
}

/// In-memory [`TweetRepository`] used by tests, documentation examples, and
/// database-less development runs.
#[derive(Debug, Default)]
pub struct FixtureTweetRepository {
    state: Mutex<FixtureState>,
}

impl FixtureTweetRepository {
    /// Build a fixture store pre-populated with one tweet per message.
    pub fn seeded<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = FixtureState::default();
        for message in messages {
            state.last_id += 1;
            state.tweets.push(Tweet {
                id: TweetId::new(state.last_id),
                message: message.into(),
            });
        }
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, FixtureState>, TweetPersistenceError> {
        self.state
            .lock()
            .map_err(|_| TweetPersistenceError::query("fixture store lock poisoned"))
    }
}

#[async_trait]
impl TweetRepository for FixtureTweetRepository {
    async fn find_all(&self) -> Result<Vec<Tweet>, TweetPersistenceError> {
        Ok(self.lock()?.tweets.clone())
    }

    async fn find_by_id(&self, id: TweetId) -> Result<Option<Tweet>, TweetPersistenceError> {
        Ok(self
            .lock()?
            .tweets
            .iter()
            .find(|tweet| tweet.id == id)
            .cloned())
    }

    async fn create(&self, message: &str) -> Result<Tweet, TweetPersistenceError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let tweet = Tweet {
            id: TweetId::new(state.last_id),
            message: message.to_owned(),
        };
        state.tweets.push(tweet.clone());
        Ok(tweet)
    }

    async fn update_message(
        &self,
        id: TweetId,
        message: &str,
    ) -> Result<Option<Tweet>, TweetPersistenceError> {
        let mut state = self.lock()?;
        let Some(tweet) = state.tweets.iter_mut().find(|tweet| tweet.id == id) else {
            return Ok(None);
        };
        tweet.message = message.to_owned();
        Ok(Some(tweet.clone()))
    }

    async fn delete(&self, id: TweetId) -> Result<bool, TweetPersistenceError> {
        let mut state = self.lock()?;
        let before = state.tweets.len();
        state.tweets.retain(|tweet| tweet.id != id);
        Ok(state.tweets.len() < before)
    }
}
