//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model validation and repository calls into use-case APIs.
//! - Own checks that need the record store (author name uniqueness).
//! - Keep CLI callers decoupled from storage details.

pub mod author_service;
pub mod post_service;
