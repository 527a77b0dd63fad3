//! Driven port exposing the caller's externally issued identity.
//!
//! The identity provider owns sign-in and token refresh; the dashboard only
//! consumes the resulting bearer credential.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::RecordValidationError;

/// Stable identifier of the signed-in operator (the identity provider's uid).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate and wrap a uid.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::BlankField { field: "uid" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the uid.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bearer credential presented to the REST API and the document store.
///
/// The secret is zeroed on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a token, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RecordValidationError::BlankField { field: "token" });
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Token text for an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// The signed-in operator and their current credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Operator uid.
    pub uid: OwnerId,
    /// Current bearer credential.
    pub token: BearerToken,
}

/// Port for reading the current identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Return the signed-in identity, or `None` when nobody is signed in or
    /// the credential could not be obtained.
    async fn current_identity(&self) -> Option<Identity>;
}
