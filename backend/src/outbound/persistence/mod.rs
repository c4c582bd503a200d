//! SQLite persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the table definition (`schema.rs`)
//! never leave this module.
//!
//! # Example
//!
//! ```no_run
//! use feedback_backend::outbound::persistence::{
//!     DbPool, DieselFeedbackRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! run_migrations("feedback.db")?;
//! let pool = DbPool::new(PoolConfig::new("feedback.db")).await?;
//! let repo = DieselFeedbackRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_feedback_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};
