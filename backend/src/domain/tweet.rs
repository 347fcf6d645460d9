//! Tweet data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on the length of a tweet message, in characters.
///
/// Shared with the inbound validation rules so the API contract and the
/// domain invariant cannot drift apart.
pub const MESSAGE_MAX_CHARS: usize = 280;

/// Store-assigned tweet identifier.
///
/// Identifiers are allocated by the database sequence and immutable once a
/// tweet has been created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(i64);

impl TweetId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the underlying integer.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TweetId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// A persisted tweet.
///
/// ## Invariants
/// - `message` is never empty and never exceeds [`MESSAGE_MAX_CHARS`]
///   characters. The inbound validation pipeline enforces this before any
///   repository write, and the database schema carries a matching check
///   constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Store-assigned identifier.
    pub id: TweetId,
    /// Tweet text, 1–280 characters.
    pub message: String,
}
