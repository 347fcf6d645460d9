//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Tweets table.
    ///
    /// The `id` column is the primary key, assigned by the database
    /// sequence. Message length is also checked by a table constraint so
    /// no path around the API can violate it.
    tweets (id) {
        /// Primary key: sequence-assigned identifier.
        id -> Int8,
        /// Tweet text (1–280 characters).
        message -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
