//! SQLite record store bootstrap.
//!
//! # Responsibility
//! - Hand out connections whose `authors`/`posts` schema is current.
//! - Report which bootstrap step failed, not just the raw SQLite error.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection is never returned with a partially applied migration.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the blog store.
#[derive(Debug)]
pub enum DbError {
    /// Connection open, pragma setup or version read failed.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with more migrations.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A migration script was rejected; the transaction was rolled back and
    /// the store stays at its previous version.
    MigrationFailed {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl DbError {
    /// Migration version that failed, if this error came from a migration.
    pub fn failed_migration(&self) -> Option<u32> {
        match self {
            Self::MigrationFailed { version, .. } => Some(*version),
            _ => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "blog store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MigrationFailed {
                version,
                name,
                source,
            } => write!(f, "migration {version} ({name}) failed: {source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
