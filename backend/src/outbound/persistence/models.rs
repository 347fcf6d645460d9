//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::tweets;

/// Row struct for reading from the tweets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tweets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TweetRow {
    pub id: i64,
    pub message: String,
    #[expect(dead_code, reason = "audit column not exposed through the API")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "audit column not exposed through the API")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new tweet records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tweets)]
pub(crate) struct NewTweetRow<'a> {
    pub message: &'a str,
}

/// Changeset struct for replacing a tweet's message.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tweets)]
pub(crate) struct TweetUpdate<'a> {
    pub message: &'a str,
}
