//! Diesel table definitions for the SQLite schema.
//!
//! Must match `migrations/` exactly.

diesel::table! {
    /// User-submitted feedback entries.
    feedback (id) {
        id -> BigInt,
        title -> Text,
        content -> Text,
        author -> Text,
        /// One of `pending`, `reviewed`, `resolved`.
        status -> Text,
        /// UTC creation time; never updated.
        #[sql_name = "timestamp"]
        created_at -> Timestamp,
    }
}
