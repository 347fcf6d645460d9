//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::TweetRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Tweet persistence port.
    pub tweets: Arc<dyn TweetRepository>,
}

impl HttpState {
    /// Construct state over a repository implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::FixtureTweetRepository;
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureTweetRepository::default()));
    /// let _tweets = state.tweets.clone();
    /// ```
    pub fn new(tweets: Arc<dyn TweetRepository>) -> Self {
        Self { tweets }
    }
}
