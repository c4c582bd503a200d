//! SQLite-backed `FeedbackRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError, ListWindow};
use crate::domain::{
    Feedback, FeedbackChanges, FeedbackFields, FeedbackId, FeedbackStatus, NewFeedback,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FeedbackRow, FeedbackUpdate, NewFeedbackRow};
use super::pool::{DbPool, PoolError};
use super::schema::feedback;

/// Diesel-backed implementation of the feedback repository port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeedbackRepositoryError {
    map_basic_pool_error(error, FeedbackRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FeedbackRepositoryError {
    map_basic_diesel_error(
        error,
        FeedbackRepositoryError::query,
        FeedbackRepositoryError::connection,
    )
}

/// Convert a row into a validated domain entry.
fn row_to_feedback(row: FeedbackRow) -> Result<Feedback, FeedbackRepositoryError> {
    let FeedbackRow {
        id,
        title,
        content,
        author,
        status,
        created_at,
    } = row;

    let status: FeedbackStatus = status
        .parse()
        .map_err(|err| FeedbackRepositoryError::query(format!("row {id}: {err}")))?;
    let fields = FeedbackFields::new(Some(&title), Some(&content), Some(&author))
        .map_err(|err| FeedbackRepositoryError::query(format!("row {id}: {err}")))?;

    Ok(Feedback::new(
        FeedbackId::new(id),
        fields,
        status,
        created_at.and_utc(),
    ))
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn list(&self, window: ListWindow) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = feedback::table
            .select(FeedbackRow::as_select())
            .order((feedback::created_at.desc(), feedback::id.desc()))
            .into_boxed();
        if let Some(after) = window.after {
            let timestamp = after.timestamp.naive_utc();
            query = query.filter(
                feedback::created_at.lt(timestamp).or(feedback::created_at
                    .eq(timestamp)
                    .and(feedback::id.lt(after.id.get()))),
            );
        }
        if let Some(limit) = window.limit {
            query = query.limit(limit);
        }

        let rows: Vec<FeedbackRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_feedback).collect()
    }

    async fn find_by_id(
        &self,
        id: FeedbackId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = feedback::table
            .find(id.get())
            .select(FeedbackRow::as_select())
            .first::<FeedbackRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_feedback).transpose()
    }

    async fn insert(&self, record: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewFeedbackRow {
            title: record.fields.title(),
            content: record.fields.content(),
            author: record.fields.author(),
            status: record.status.as_str(),
            created_at: record.timestamp.naive_utc(),
        };

        let row = diesel::insert_into(feedback::table)
            .values(&new_row)
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_feedback(row)
    }

    async fn update(
        &self,
        id: FeedbackId,
        changes: &FeedbackChanges,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update_row = FeedbackUpdate {
            title: changes.fields.title(),
            content: changes.fields.content(),
            author: changes.fields.author(),
            status: changes.status.map(FeedbackStatus::as_str),
        };

        let row = diesel::update(feedback::table.find(id.get()))
            .set(&update_row)
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_feedback).transpose()
    }

    async fn delete(&self, id: FeedbackId) -> Result<bool, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(feedback::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> FeedbackRow {
        FeedbackRow {
            id: 3,
            title: "Export".to_owned(),
            content: "CSV please".to_owned(),
            author: "li".to_owned(),
            status: "reviewed".to_owned(),
            created_at: NaiveDate::from_ymd_opt(2025, 2, 1)
                .and_then(|date| date.and_hms_opt(8, 0, 0))
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn row_converts_to_domain(valid_row: FeedbackRow) {
        let entry = row_to_feedback(valid_row).expect("valid row");

        assert_eq!(entry.id(), FeedbackId::new(3));
        assert_eq!(entry.status(), FeedbackStatus::Reviewed);
        assert_eq!(entry.timestamp().to_rfc3339(), "2025-02-01T08:00:00+00:00");
    }

    #[rstest]
    fn unknown_status_is_a_query_error(mut valid_row: FeedbackRow) {
        valid_row.status = "archived".to_owned();

        let err = row_to_feedback(valid_row).expect_err("bad status");

        assert!(matches!(err, FeedbackRepositoryError::Query { .. }));
        assert!(err.to_string().contains("archived"));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, FeedbackRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
