//! Embedded schema migrations for the blog store.
//!
//! # Responsibility
//! - List the SQL scripts that build the `authors` and `posts` tables.
//! - Bring a connection from its stored version up to `latest_version()`.
//!
//! # Invariants
//! - Versions start at 1 and increase by exactly one per entry.
//! - All pending scripts run in one transaction; any failure leaves
//!   `user_version` untouched.
//! - `authors.name` is `UNIQUE`; that index is the backstop for writers
//!   racing past the service-level name check.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};
use std::time::Instant;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_authors_and_posts",
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Runs every migration newer than the stored version.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `DbError::MigrationFailed` naming the first script SQLite rejected.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stored = current_user_version(conn)?;
    let latest = latest_version();
    if stored > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stored,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > stored).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        run_migration(&tx, migration)?;
    }
    tx.commit()?;
    Ok(())
}

fn run_migration(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    let started_at = Instant::now();
    let script = format!(
        "{}\nPRAGMA user_version = {};",
        migration.sql, migration.version
    );

    match tx.execute_batch(&script) {
        Ok(()) => {
            info!(
                "event=db_migration module=db status=ok version={} name={} duration_ms={}",
                migration.version,
                migration.name,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(source) => {
            error!(
                "event=db_migration module=db status=error version={} name={} error={source}",
                migration.version, migration.name
            );
            Err(DbError::MigrationFailed {
                version: migration.version,
                name: migration.name,
                source,
            })
        }
    }
}
