//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and, through the `test-support` feature,
//! by integration tests in `tests/`.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Clock that moves forward by a fixed step after every reading.
///
/// Gives each created entry a distinct timestamp without sleeping.
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = match self.next.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = *next;
        *next = now + self.step;
        now
    }
}

pub mod sqlite {
    //! Throwaway SQLite databases for repository and HTTP tests.

    use std::io;

    use tempfile::TempDir;

    use crate::outbound::persistence::{DbPool, PoolConfig, run_migrations};

    /// A migrated database file inside a temporary directory.
    ///
    /// The directory, and with it the file, is removed on drop.
    pub struct TempDatabase {
        _dir: TempDir,
        url: String,
        pool: DbPool,
    }

    impl TempDatabase {
        /// Create, migrate and pool a fresh database.
        ///
        /// # Errors
        ///
        /// Returns an [`io::Error`] when the directory cannot be created or
        /// the database cannot be migrated or pooled.
        pub async fn new() -> io::Result<Self> {
            let dir = tempfile::tempdir()?;
            let url = dir.path().join("feedback.db").to_string_lossy().into_owned();
            run_migrations(&url).map_err(io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url.clone()).with_max_size(2))
                .await
                .map_err(io::Error::other)?;
            Ok(Self {
                _dir: dir,
                url,
                pool,
            })
        }

        pub fn url(&self) -> &str {
            &self.url
        }

        pub fn pool(&self) -> DbPool {
            self.pool.clone()
        }
    }
}
