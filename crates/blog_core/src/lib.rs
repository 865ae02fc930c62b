//! Core domain logic for the blog backend.
//! This crate is the single source of truth for author and post invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::author::{Author, AuthorId};
pub use model::post::{Category, Post, PostId};
pub use model::validation::{Field, ValidationError};
pub use repo::author_repo::{AuthorListQuery, AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::{NewPost, PostService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
