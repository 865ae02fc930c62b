//! Field-level validation error shared by all blog models.
//!
//! # Responsibility
//! - Provide one structured error kind for every rejected field value.
//! - Keep user-facing messages stable so callers can surface them verbatim.
//!
//! # Invariants
//! - Every variant maps to exactly one `Field` and one stable `code()`.
//! - `Display` output never includes the rejected value itself.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum accepted post content length, in characters.
pub const CONTENT_MIN_CHARS: usize = 250;
/// Maximum accepted post summary length, in characters.
pub const SUMMARY_MAX_CHARS: usize = 250;
/// Exact phone number length, in digits.
pub const PHONE_NUMBER_DIGITS: usize = 10;

/// Phrases of which a post title must contain at least one.
pub const CLICKBAIT_PHRASES: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];

/// Model field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AuthorName,
    AuthorPhoneNumber,
    PostTitle,
    PostContent,
    PostSummary,
    PostCategory,
}

impl Field {
    /// Column name of the field in persistent storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthorName => "name",
            Self::AuthorPhoneNumber => "phone_number",
            Self::PostTitle => "title",
            Self::PostContent => "content",
            Self::PostSummary => "summary",
            Self::PostCategory => "category",
        }
    }
}

/// Rejection of a single field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    /// Another author already uses this name.
    DuplicateName,
    PhoneNumberNotNumeric,
    PhoneNumberLength { actual: usize },
    TitleMissingClickbait,
    ContentTooShort { actual: usize },
    SummaryTooLong { actual: usize },
    InvalidCategory,
}

impl ValidationError {
    /// Field the rejected value was assigned to.
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyName | Self::DuplicateName => Field::AuthorName,
            Self::PhoneNumberNotNumeric | Self::PhoneNumberLength { .. } => {
                Field::AuthorPhoneNumber
            }
            Self::TitleMissingClickbait => Field::PostTitle,
            Self::ContentTooShort { .. } => Field::PostContent,
            Self::SummaryTooLong { .. } => Field::PostSummary,
            Self::InvalidCategory => Field::PostCategory,
        }
    }

    /// Stable reason code for programmatic branching.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::DuplicateName => "duplicate_name",
            Self::PhoneNumberNotNumeric => "phone_number_not_numeric",
            Self::PhoneNumberLength { .. } => "phone_number_length",
            Self::TitleMissingClickbait => "title_missing_clickbait",
            Self::ContentTooShort { .. } => "content_too_short",
            Self::SummaryTooLong { .. } => "summary_too_long",
            Self::InvalidCategory => "invalid_category",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty."),
            Self::DuplicateName => write!(f, "Duplicate name."),
            Self::PhoneNumberNotNumeric => write!(f, "Phone number must contain only numbers."),
            Self::PhoneNumberLength { .. } => write!(
                f,
                "Phone number must be exactly {PHONE_NUMBER_DIGITS} digits."
            ),
            Self::TitleMissingClickbait => write!(
                f,
                "Title must include one of the following values: {}",
                quoted_list(&CLICKBAIT_PHRASES)
            ),
            Self::ContentTooShort { .. } => write!(
                f,
                "Content must be at least {CONTENT_MIN_CHARS} characters long."
            ),
            Self::SummaryTooLong { .. } => write!(
                f,
                "Summary must be {SUMMARY_MAX_CHARS} characters or less."
            ),
            Self::InvalidCategory => write!(
                f,
                "Category must be one of {}",
                quoted_list(&crate::model::post::Category::NAMES)
            ),
        }
    }
}

impl Error for ValidationError {}

/// Renders `['a', "b'c"]`: single quotes unless the item contains one.
fn quoted_list(items: &[&str]) -> String {
    let quoted = items
        .iter()
        .map(|item| {
            if item.contains('\'') {
                format!("\"{item}\"")
            } else {
                format!("'{item}'")
            }
        })
        .collect::<Vec<_>>();
    format!("[{}]", quoted.join(", "))
}
