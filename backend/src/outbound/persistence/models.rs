//! Internal Diesel row structs for the feedback table.
//!
//! These types stay inside the persistence layer; repositories convert them
//! to domain values before returning.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::feedback;

/// Row struct for reading from the feedback table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feedback)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct FeedbackRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for new feedback rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedback)]
pub(crate) struct NewFeedbackRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

/// Changeset for edits; a `None` status leaves the column untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = feedback)]
pub(crate) struct FeedbackUpdate<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author: &'a str,
    pub status: Option<&'a str>,
}
