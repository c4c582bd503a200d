//! Embedded schema migrations.
//!
//! Migrations run once at startup on a plain synchronous connection, before
//! the async pool opens. Applied migrations are skipped on restart. Database
//! files created without the `status` column are not supported.

use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while preparing the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to open database {database_url}: {message}")]
    Connect {
        database_url: String,
        message: String,
    },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Create the database file if needed and apply pending migrations.
///
/// # Errors
///
/// Returns [`MigrationError`] when the file cannot be opened or a migration
/// fails.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn =
        SqliteConnection::establish(database_url).map_err(|err| MigrationError::Connect {
            database_url: database_url.to_owned(),
            message: err.to_string(),
        })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    info!(applied = applied.len(), "database schema up to date");
    Ok(())
}
