//! Blog domain models.
//!
//! # Responsibility
//! - Define canonical author and post records used by core business logic.
//! - Own every store-free field validation rule.
//!
//! # Invariants
//! - Models are only mutated through validating setters.
//! - A rejected assignment leaves the previous value in place.
//! - Authors and posts are independent; neither references the other.

pub mod author;
pub mod post;
pub mod validation;
