//! Feedback aggregate and its validated building blocks.
//!
//! A feedback entry is a titled note left by an author. Entries start out
//! `pending` and move through `reviewed` to `resolved` as maintainers act on
//! them. The creation timestamp is assigned once by the service and never
//! changes afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned identifier of a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(i64);

impl FeedbackId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a path segment is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feedback id must be an integer, got {raw:?}")]
pub struct FeedbackIdParseError {
    raw: String,
}

impl FromStr for FeedbackId {
    type Err = FeedbackIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| FeedbackIdParseError { raw: s.to_owned() })
    }
}

/// Workflow state of a feedback entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    Reviewed,
    Resolved,
}

impl FeedbackStatus {
    /// Every accepted status, in workflow order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Reviewed, Self::Resolved];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is not one of [`FeedbackStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feedback status {value:?}")]
pub struct FeedbackStatusParseError {
    value: String,
}

impl FeedbackStatusParseError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for FeedbackStatus {
    type Err = FeedbackStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| FeedbackStatusParseError {
                value: s.to_owned(),
            })
    }
}

/// Names the first required field found missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeedbackValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
    #[error("author is required")]
    MissingAuthor,
}

impl FeedbackValidationError {
    /// Request field the error refers to.
    pub const fn field(self) -> &'static str {
        match self {
            Self::MissingTitle => "title",
            Self::MissingContent => "content",
            Self::MissingAuthor => "author",
        }
    }
}

/// The user-authored text of a feedback entry.
///
/// ## Invariants
/// - `title`, `content` and `author` are non-empty.
///
/// # Examples
/// ```
/// use feedback_backend::domain::{FeedbackFields, FeedbackValidationError};
///
/// let fields = FeedbackFields::new(Some("Dark mode"), Some("Please"), Some("ana"))
///     .expect("valid fields");
/// assert_eq!(fields.title(), "Dark mode");
///
/// let err = FeedbackFields::new(Some("Dark mode"), Some(""), Some("ana"))
///     .expect_err("empty content");
/// assert_eq!(err, FeedbackValidationError::MissingContent);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackFields {
    title: String,
    content: String,
    author: String,
}

impl FeedbackFields {
    /// Validate raw request values.
    ///
    /// Only presence is checked; values are stored as given.
    pub fn new(
        title: Option<&str>,
        content: Option<&str>,
        author: Option<&str>,
    ) -> Result<Self, FeedbackValidationError> {
        Ok(Self {
            title: required(title, FeedbackValidationError::MissingTitle)?,
            content: required(content, FeedbackValidationError::MissingContent)?,
            author: required(author, FeedbackValidationError::MissingAuthor)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

fn required(
    value: Option<&str>,
    missing: FeedbackValidationError,
) -> Result<String, FeedbackValidationError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(missing),
    }
}

/// Position of an entry in the newest-first listing order.
///
/// Entries sort by `timestamp` descending, ties broken by `id` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSortKey {
    pub timestamp: DateTime<Utc>,
    pub id: FeedbackId,
}

/// A stored feedback entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    id: FeedbackId,
    fields: FeedbackFields,
    status: FeedbackStatus,
    timestamp: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        id: FeedbackId,
        fields: FeedbackFields,
        status: FeedbackStatus,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            status,
            timestamp,
        }
    }

    pub fn id(&self) -> FeedbackId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.fields.title()
    }

    pub fn content(&self) -> &str {
        self.fields.content()
    }

    pub fn author(&self) -> &str {
        self.fields.author()
    }

    pub fn status(&self) -> FeedbackStatus {
        self.status
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn sort_key(&self) -> FeedbackSortKey {
        FeedbackSortKey {
            timestamp: self.timestamp,
            id: self.id,
        }
    }
}

/// Values persisted when creating an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub fields: FeedbackFields,
    pub status: FeedbackStatus,
    pub timestamp: DateTime<Utc>,
}

/// Replacement values for an existing entry.
///
/// A `None` status keeps the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackChanges {
    pub fields: FeedbackFields,
    pub status: Option<FeedbackStatus>,
}
