use crate::error::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

pub mod alert;
pub mod case;

pub use case::{CaseFilter, CaseRow, CaseUpdate, NewCase};

/// Unified access layer over the caseflow database.
///
/// All methods are `async fn` backed by SeaORM. The handle is cheap to
/// share behind an `Arc`; write serialization for the alert snapshot is the
/// caller's responsibility.
pub struct CaseStore {
    pub(crate) db: DatabaseConnection,
}

impl CaseStore {
    /// Connect and initialize the database.
    ///
    /// `db_url` is a full connection URL, e.g.
    /// `sqlite:///data/caseflow.db?mode=rwc` or `sqlite::memory:`. Runs
    /// pending migrations so the schema is always current.
    pub async fn new(db_url: &str) -> Result<Self> {
        let db = Database::connect(db_url).await?;

        // WAL mode only applies to file-backed SQLite databases.
        if db_url.starts_with("sqlite://") {
            db.execute_unprepared("PRAGMA journal_mode=WAL;").await?;
        }

        Migrator::up(&db, None).await?;
        Ok(Self { db })
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
