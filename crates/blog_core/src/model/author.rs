//! Author domain model.
//!
//! # Responsibility
//! - Define the canonical author record and its store-free field rules.
//! - Reject invalid assignments without touching the previous value.
//!
//! # Invariants
//! - `name` is never empty.
//! - `phone_number`, when set, is exactly ten ASCII digits.
//! - `id` and timestamps are only ever assigned by the record store.
//!
//! Name uniqueness needs the record store and is enforced by
//! `AuthorService` together with the `authors.name` unique index.

use crate::model::validation::{ValidationError, PHONE_NUMBER_DIGITS};
use serde::{Deserialize, Serialize};

/// Surrogate primary key assigned by the record store.
pub type AuthorId = i64;

/// Blog author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorFields")]
pub struct Author {
    id: Option<AuthorId>,
    name: String,
    phone_number: Option<String>,
    /// Unix epoch milliseconds.
    created_at: Option<i64>,
    /// Unix epoch milliseconds. `None` until the first update.
    updated_at: Option<i64>,
}

#[derive(Deserialize)]
struct AuthorFields {
    #[serde(default)]
    id: Option<AuthorId>,
    name: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<AuthorFields> for Author {
    type Error = ValidationError;

    fn try_from(value: AuthorFields) -> Result<Self, Self::Error> {
        Self::from_stored(
            value.id,
            value.name,
            value.phone_number,
            value.created_at,
            value.updated_at,
        )
    }
}

impl Author {
    /// Creates an unsaved author, validating `name` first and then
    /// `phone_number`.
    pub fn new(
        name: impl Into<String>,
        phone_number: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut author = Self {
            id: None,
            name: String::new(),
            phone_number: None,
            created_at: None,
            updated_at: None,
        };
        author.set_name(name)?;
        author.set_phone_number(phone_number)?;
        Ok(author)
    }

    /// Rebuilds an author from stored columns.
    ///
    /// Used by repository read paths and deserialization; persisted state is
    /// re-validated instead of trusted.
    pub fn from_stored(
        id: Option<AuthorId>,
        name: String,
        phone_number: Option<String>,
        created_at: Option<i64>,
        updated_at: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let author = Self {
            id,
            name,
            phone_number,
            created_at,
            updated_at,
        };
        author.validate()?;
        Ok(author)
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    /// Returns whether the store has assigned an id to this author.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Assigns a new name after the store-free checks.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` when `name` is empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Assigns or clears the phone number.
    ///
    /// `None` clears the field and is always accepted.
    ///
    /// # Errors
    /// - `ValidationError::PhoneNumberNotNumeric` for any non-digit character.
    /// - `ValidationError::PhoneNumberLength` when not exactly ten digits.
    pub fn set_phone_number(&mut self, phone_number: Option<String>) -> Result<(), ValidationError> {
        if let Some(value) = phone_number.as_deref() {
            validate_phone_number(value)?;
        }
        self.phone_number = phone_number;
        Ok(())
    }

    /// Re-checks every store-free field rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        if let Some(value) = self.phone_number.as_deref() {
            validate_phone_number(value)?;
        }
        Ok(())
    }
}

/// Rejects empty author names.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Rejects phone numbers that are not exactly ten ASCII digits.
///
/// The digit check runs first, so an empty string is reported as
/// non-numeric.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if phone_number.is_empty() || !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PhoneNumberNotNumeric);
    }
    let actual = phone_number.chars().count();
    if actual != PHONE_NUMBER_DIGITS {
        return Err(ValidationError::PhoneNumberLength { actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_phone_number, Author};
    use crate::model::validation::ValidationError;

    #[test]
    fn rejected_assignment_keeps_previous_value() {
        let mut author = Author::new("Jane Doe", Some("5551234567".to_string())).unwrap();

        assert_eq!(author.set_name(""), Err(ValidationError::EmptyName));
        assert_eq!(author.name(), "Jane Doe");

        let err = author
            .set_phone_number(Some("555-123-45".to_string()))
            .unwrap_err();
        assert_eq!(err, ValidationError::PhoneNumberNotNumeric);
        assert_eq!(author.phone_number(), Some("5551234567"));
    }

    #[test]
    fn phone_number_digit_check_precedes_length_check() {
        assert_eq!(
            validate_phone_number("12ab"),
            Err(ValidationError::PhoneNumberNotNumeric)
        );
        assert_eq!(
            validate_phone_number("123"),
            Err(ValidationError::PhoneNumberLength { actual: 3 })
        );
        assert_eq!(
            validate_phone_number(""),
            Err(ValidationError::PhoneNumberNotNumeric)
        );
    }

    #[test]
    fn fullwidth_digits_are_not_accepted() {
        assert_eq!(
            validate_phone_number("５５５１２３４５６７"),
            Err(ValidationError::PhoneNumberNotNumeric)
        );
    }
}
