//! Author use-case service.
//!
//! # Responsibility
//! - Provide create/rename/re-number/delete entry points for authors.
//! - Run the store-backed name uniqueness check before writes.
//!
//! # Invariants
//! - Validation order on create: name (empty, then duplicate), then phone.
//! - Every mutation returns the record as read back from the store.
//! - The pre-write check is advisory; the unique index on `authors.name`
//!   still rejects a racing duplicate with `ValidationError::DuplicateName`.

use crate::model::author::{validate_name, Author, AuthorId};
use crate::model::validation::ValidationError;
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an author and returns the stored record.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName`, `DuplicateName`,
    ///   `PhoneNumberNotNumeric` or `PhoneNumberLength`, in that order.
    pub fn create_author(
        &self,
        name: impl Into<String>,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        let result = self.insert(name.into(), phone_number);
        log_outcome("author_create", &result);
        result
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_author_by_name(name)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    /// Renames an author.
    ///
    /// Keeping the current name is accepted; taking another author's name is
    /// rejected with `ValidationError::DuplicateName`.
    pub fn set_name(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        let name = name.into();
        let result = self.modify(id, |author| {
            author.set_name(name)?;
            self.ensure_name_available(author.name(), Some(id))
        });
        log_outcome("author_set_name", &result);
        result
    }

    /// Sets or clears (`None`) an author's phone number.
    pub fn set_phone_number(
        &self,
        id: AuthorId,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        let result = self.modify(id, |author| Ok(author.set_phone_number(phone_number)?));
        log_outcome("author_set_phone_number", &result);
        result
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)?;
        info!("event=author_delete module=service status=ok author_id={id}");
        Ok(())
    }

    fn insert(&self, name: String, phone_number: Option<String>) -> RepoResult<Author> {
        validate_name(&name)?;
        self.ensure_name_available(&name, None)?;
        let author = Author::new(name, phone_number)?;
        let id = self.repo.create_author(&author)?;
        self.read_back(id)
    }

    /// Fails with `DuplicateName` when an author other than `except` already
    /// uses `name`.
    fn ensure_name_available(&self, name: &str, except: Option<AuthorId>) -> RepoResult<()> {
        match self.repo.author_id_by_name(name)? {
            Some(existing) if Some(existing) != except => {
                Err(RepoError::Validation(ValidationError::DuplicateName))
            }
            _ => Ok(()),
        }
    }

    fn modify<F>(&self, id: AuthorId, apply: F) -> RepoResult<Author>
    where
        F: FnOnce(&mut Author) -> RepoResult<()>,
    {
        let mut author = self.read_back(id)?;
        apply(&mut author)?;
        self.repo.update_author(&author)?;
        self.read_back(id)
    }

    fn read_back(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo
            .get_author(id)?
            .ok_or(RepoError::NotFound {
                entity: "author",
                id,
            })
    }
}

fn log_outcome(event: &str, result: &RepoResult<Author>) {
    match result {
        Ok(author) => info!(
            "event={event} module=service status=ok author_id={}",
            author.id().unwrap_or_default()
        ),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module=service status=rejected field={} error_code={}",
            err.field().as_str(),
            err.code()
        ),
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
}
