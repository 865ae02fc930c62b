//! Post domain model.
//!
//! # Responsibility
//! - Define the canonical blog post record and its field rules.
//! - Reject invalid assignments without touching the previous value.
//!
//! # Invariants
//! - `title` contains at least one clickbait phrase, case-insensitively.
//! - `content`, when set, has at least 250 characters.
//! - `summary`, when set, has at most 250 characters.
//! - `category`, when set, is `Fiction` or `Non-Fiction`.
//!
//! Lengths are counted in characters, not bytes.

use crate::model::validation::{
    ValidationError, CLICKBAIT_PHRASES, CONTENT_MIN_CHARS, SUMMARY_MAX_CHARS,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static LOWERED_PHRASES: Lazy<Vec<String>> = Lazy::new(|| {
    CLICKBAIT_PHRASES
        .iter()
        .map(|phrase| phrase.to_lowercase())
        .collect()
});

/// Surrogate primary key assigned by the record store.
pub type PostId = i64;

/// Whitelisted post category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    /// Accepted textual values, in declaration order.
    pub const NAMES: [&'static str; 2] = ["Fiction", "Non-Fiction"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Exact, case-sensitive match against `Category::NAMES`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Fiction" => Ok(Self::Fiction),
            "Non-Fiction" => Ok(Self::NonFiction),
            _ => Err(ValidationError::InvalidCategory),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostFields")]
pub struct Post {
    id: Option<PostId>,
    title: String,
    content: Option<String>,
    summary: Option<String>,
    category: Option<Category>,
    /// Unix epoch milliseconds.
    created_at: Option<i64>,
    /// Unix epoch milliseconds. `None` until the first update.
    updated_at: Option<i64>,
}

#[derive(Deserialize)]
struct PostFields {
    #[serde(default)]
    id: Option<PostId>,
    title: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<PostFields> for Post {
    type Error = ValidationError;

    fn try_from(value: PostFields) -> Result<Self, Self::Error> {
        let post = Self {
            id: value.id,
            title: value.title,
            content: value.content,
            summary: value.summary,
            category: value.category,
            created_at: value.created_at,
            updated_at: value.updated_at,
        };
        post.validate()?;
        Ok(post)
    }
}

impl Post {
    /// Creates an unsaved post with only a title.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let mut post = Self {
            id: None,
            title: String::new(),
            content: None,
            summary: None,
            category: None,
            created_at: None,
            updated_at: None,
        };
        post.set_title(title)?;
        Ok(post)
    }

    /// Rebuilds a post from stored columns, re-validating every field.
    ///
    /// `category` is the raw stored text.
    pub fn from_stored(
        id: Option<PostId>,
        title: String,
        content: Option<String>,
        summary: Option<String>,
        category: Option<&str>,
        created_at: Option<i64>,
        updated_at: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let category = category.map(Category::from_str).transpose()?;
        let post = Self {
            id,
            title,
            content,
            summary,
            category,
            created_at,
            updated_at,
        };
        post.validate()?;
        Ok(post)
    }

    pub fn id(&self) -> Option<PostId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// # Errors
    /// - `ValidationError::TitleMissingClickbait` when no phrase matches.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    /// `None` clears the content.
    ///
    /// # Errors
    /// - `ValidationError::ContentTooShort` below 250 characters.
    pub fn set_content(&mut self, content: Option<String>) -> Result<(), ValidationError> {
        if let Some(value) = content.as_deref() {
            validate_content(value)?;
        }
        self.content = content;
        Ok(())
    }

    /// `None` clears the summary.
    ///
    /// # Errors
    /// - `ValidationError::SummaryTooLong` above 250 characters.
    pub fn set_summary(&mut self, summary: Option<String>) -> Result<(), ValidationError> {
        if let Some(value) = summary.as_deref() {
            validate_summary(value)?;
        }
        self.summary = summary;
        Ok(())
    }

    /// Parses and assigns a textual category; `None` clears it.
    ///
    /// # Errors
    /// - `ValidationError::InvalidCategory` unless exactly `Fiction` or
    ///   `Non-Fiction`.
    pub fn set_category(&mut self, category: Option<&str>) -> Result<(), ValidationError> {
        self.category = category.map(Category::from_str).transpose()?;
        Ok(())
    }

    /// Re-checks every field rule, in declaration order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if let Some(value) = self.content.as_deref() {
            validate_content(value)?;
        }
        if let Some(value) = self.summary.as_deref() {
            validate_summary(value)?;
        }
        Ok(())
    }
}

/// Requires at least one clickbait phrase as a case-insensitive substring.
///
/// Matching compares full Unicode lowercase forms, not case folds: `ſecret`
/// does not contain `secret`.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let lowered = title.to_lowercase();
    if !LOWERED_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase.as_str()))
    {
        return Err(ValidationError::TitleMissingClickbait);
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    let actual = content.chars().count();
    if actual < CONTENT_MIN_CHARS {
        return Err(ValidationError::ContentTooShort { actual });
    }
    Ok(())
}

pub fn validate_summary(summary: &str) -> Result<(), ValidationError> {
    let actual = summary.chars().count();
    if actual > SUMMARY_MAX_CHARS {
        return Err(ValidationError::SummaryTooLong { actual });
    }
    Ok(())
}
