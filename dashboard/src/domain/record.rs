//! Record identity and the traits shared by every dashboard record kind.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised while building or updating a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    /// Record identifier was blank once trimmed.
    #[error("record id must not be empty")]
    EmptyId,
    /// A required text field was blank once trimmed.
    #[error("{field} must not be empty")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A currency field carried a negative amount.
    #[error("{field} must not be negative")]
    NegativeAmount {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Status text did not name a known status.
    #[error("unknown {kind} status '{value}'")]
    UnknownStatus {
        /// Which status vocabulary was being parsed.
        kind: &'static str,
        /// The rejected text.
        value: String,
    },
}

/// Opaque record identifier, unique within its collection.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
///
/// # Examples
/// ```
/// use dashboard::domain::RecordId;
///
/// let id = RecordId::new(" svc-1 ").expect("valid id");
/// assert_eq!(id.as_str(), "svc-1");
/// assert!(RecordId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Validate and wrap an identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generate a fresh identifier for a new record.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// A record shown on a dashboard: identified, and filterable by one
/// discriminator attribute (status or category).
pub trait Record {
    /// Attribute type used for filtering.
    type Discriminator: Clone + PartialEq + fmt::Debug;

    /// Record identifier.
    fn id(&self) -> &RecordId;

    /// Current discriminator value.
    fn discriminator(&self) -> &Self::Discriminator;
}

/// Records that operators can create from a draft and edit in place.
pub trait Drafted: Record + Sized {
    /// Input captured by an "add" form, without an identifier.
    type Draft;

    /// Build a record from a draft under the given identifier.
    fn from_draft(id: RecordId, draft: Self::Draft) -> Result<Self, RecordValidationError>;

    /// Check the record's field-level invariants.
    fn validate(&self) -> Result<(), RecordValidationError>;
}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField { field });
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: Option<money::Money>,
) -> Result<(), RecordValidationError> {
    match value {
        Some(amount) if amount.is_negative() => {
            Err(RecordValidationError::NegativeAmount { field })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(RecordId::new(raw), Err(RecordValidationError::EmptyId));
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn ids_reject_blank_values_when_decoded() {
        let result: Result<RecordId, _> = serde_json::from_str("\" \"");
        assert!(result.is_err(), "blank ids must not decode");
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let amount: money::Money = "-1".parse().expect("valid amount");
        assert_eq!(
            require_non_negative("cost", Some(amount)),
            Err(RecordValidationError::NegativeAmount { field: "cost" })
        );
        assert_eq!(require_non_negative("cost", None), Ok(()));
    }
}
