//! Post use-case service.
//!
//! # Responsibility
//! - Provide create/field-update/delete entry points for posts.
//!
//! # Invariants
//! - Validation order on create: title, content, summary, category.
//! - A rejected field aborts the whole write; nothing is persisted.

use crate::model::post::{Post, PostId};
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Request model for creating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub summary: Option<String>,
    /// Textual category, validated against the whitelist.
    pub category: Option<String>,
}

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a post and returns the stored record.
    pub fn create_post(&self, request: &NewPost) -> RepoResult<Post> {
        let result = self.insert(request);
        log_outcome("post_create", &result);
        result
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn set_title(&self, id: PostId, title: impl Into<String>) -> RepoResult<Post> {
        let title = title.into();
        let result = self.modify(id, |post| Ok(post.set_title(title)?));
        log_outcome("post_set_title", &result);
        result
    }

    pub fn set_content(&self, id: PostId, content: Option<String>) -> RepoResult<Post> {
        let result = self.modify(id, |post| Ok(post.set_content(content)?));
        log_outcome("post_set_content", &result);
        result
    }

    pub fn set_summary(&self, id: PostId, summary: Option<String>) -> RepoResult<Post> {
        let result = self.modify(id, |post| Ok(post.set_summary(summary)?));
        log_outcome("post_set_summary", &result);
        result
    }

    pub fn set_category(&self, id: PostId, category: Option<&str>) -> RepoResult<Post> {
        let result = self.modify(id, |post| Ok(post.set_category(category)?));
        log_outcome("post_set_category", &result);
        result
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.repo.delete_post(id)?;
        info!("event=post_delete module=service status=ok post_id={id}");
        Ok(())
    }

    fn insert(&self, request: &NewPost) -> RepoResult<Post> {
        let mut post = Post::new(request.title.clone())?;
        post.set_content(request.content.clone())?;
        post.set_summary(request.summary.clone())?;
        post.set_category(request.category.as_deref())?;
        let id = self.repo.create_post(&post)?;
        self.read_back(id)
    }

    fn modify<F>(&self, id: PostId, apply: F) -> RepoResult<Post>
    where
        F: FnOnce(&mut Post) -> RepoResult<()>,
    {
        let mut post = self.read_back(id)?;
        apply(&mut post)?;
        self.repo.update_post(&post)?;
        self.read_back(id)
    }

    fn read_back(&self, id: PostId) -> RepoResult<Post> {
        self.repo
            .get_post(id)?
            .ok_or(RepoError::NotFound { entity: "post", id })
    }
}

fn log_outcome(event: &str, result: &RepoResult<Post>) {
    match result {
        Ok(post) => info!(
            "event={event} module=service status=ok post_id={}",
            post.id().unwrap_or_default()
        ),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module=service status=rejected field={} error_code={}",
            err.field().as_str(),
            err.code()
        ),
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
}
