//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and find-by-name over the `authors` table.
//! - Translate unique-index violations into `ValidationError::DuplicateName`.
//!
//! # Invariants
//! - `id`, `created_at` and `updated_at` are assigned by SQLite, never taken
//!   from the caller.
//! - Name lookups use exact, case-sensitive comparison.

use super::{
    ensure_connection_ready, is_unique_violation, push_pagination, RepoError, RepoResult,
};
use crate::model::author::{Author, AuthorId};
use crate::model::validation::ValidationError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const ENTITY: &str = "author";

const AUTHOR_COLUMNS: &[&str] = &["id", "name", "phone_number", "created_at", "updated_at"];

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Pagination options for listing authors (ordered by id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Record store contract for authors.
pub trait AuthorRepository {
    /// Inserts a new row and returns the store-assigned id.
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId>;
    /// Rewrites name and phone number, refreshing `updated_at`.
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact-match lookup returning the full, validated record.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    /// Id of the author holding `name`, without decoding the row. A stored
    /// row that no longer validates still reserves its name.
    fn author_id_by_name(&self, name: &str) -> RepoResult<Option<AuthorId>>;
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when migrations were not applied.
    /// - `RepoError::MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   `authors` schema is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "authors", AUTHOR_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId> {
        author.validate()?;

        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name(), author.phone_number()],
            )
            .map_err(map_write_error)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        let id = author.id().ok_or(RepoError::NotPersisted(ENTITY))?;
        author.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![author.name(), author.phone_number(), id],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE name = ?1 LIMIT 1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn author_id_by_name(&self, name: &str) -> RepoResult<Option<AuthorId>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id FROM authors WHERE name = ?1 LIMIT 1;",
                [name],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::Validation(ValidationError::DuplicateName);
    }
    err.into()
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    Author::from_stored(
        Some(id),
        row.get("name")?,
        row.get("phone_number")?,
        Some(row.get("created_at")?),
        row.get("updated_at")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("authors row {id}: {err}")))
}
