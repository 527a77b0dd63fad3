//! Resilient record fetching: a primary source with a direct-store fallback.
//!
//! The fallback only absorbs outages. Credential and validation failures are
//! attributable to the primary path and surface unchanged.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::ports::{Identity, IdentityProvider};

/// Failure category of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchErrorKind {
    /// The source could not be reached.
    Network,
    /// No valid credential, or the credential was refused.
    Auth,
    /// The source was reached but rejected or garbled the request.
    Server,
    /// The operator's profile does not exist in the store.
    NotFound,
}

/// Terminal fetch failure, carrying a message fit for display.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    /// Build an error of the given kind.
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build a [`FetchErrorKind::Auth`] error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Auth, message)
    }

    /// Build a [`FetchErrorKind::Network`] error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    /// Convert any classified port error, keeping its message.
    pub fn classify<E: Classify>(error: &E) -> Self {
        Self::new(error.kind(), error.to_string())
    }

    /// Failure category.
    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Outcome of one fetch: the records of exactly one source, or an error.
pub type FetchResult<R> = Result<Vec<R>, FetchError>;

/// Errors that know which failure category they belong to.
///
/// Classification decides retry eligibility; the `Display` text decides what
/// a user sees.
pub trait Classify: std::error::Error {
    /// Failure category of this error.
    fn kind(&self) -> FetchErrorKind;

    /// Whether the fallback path may be tried after this error.
    fn is_fallback_eligible(&self) -> bool {
        self.kind() == FetchErrorKind::Network
    }
}

/// Message returned when nobody is signed in.
pub const NOT_AUTHENTICATED: &str = "User not authenticated";

/// Runs a primary fetch and, after a network-class failure, a fallback fetch,
/// both on behalf of the current identity.
pub struct FetchWithFallback<I: ?Sized> {
    identity: Arc<I>,
}

impl<I: ?Sized> Clone for FetchWithFallback<I> {
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<I> FetchWithFallback<I>
where
    I: IdentityProvider + ?Sized,
{
    /// Create a fetcher bound to an identity provider.
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Resolve the current identity, failing with [`FetchErrorKind::Auth`]
    /// when there is none.
    pub async fn require_identity(&self) -> Result<Identity, FetchError> {
        self.identity.current_identity().await.ok_or_else(|| {
            warn!("no identity credential available; skipping remote calls");
            FetchError::auth(NOT_AUTHENTICATED)
        })
    }

    /// Load records through `primary`, falling back to `fallback` only when
    /// the primary failure is network-class.
    ///
    /// Without an identity neither closure is invoked.
    pub async fn load<R, P, PF, PE, F, FF, FE>(&self, primary: P, fallback: F) -> FetchResult<R>
    where
        P: FnOnce(Identity) -> PF,
        PF: Future<Output = Result<Vec<R>, PE>>,
        PE: Classify,
        F: FnOnce(Identity) -> FF,
        FF: Future<Output = Result<Vec<R>, FE>>,
        FE: Classify,
    {
        let identity = self.require_identity().await?;
        let primary_identity = identity.clone();
        load_with_fallback(primary(primary_identity), move || fallback(identity)).await
    }
}

/// Await `primary`; on a network-class failure await the future produced by
/// `fallback`. The two sources are never merged and never run concurrently.
///
/// # Examples
/// ```
/// use dashboard::domain::{Classify, FetchErrorKind, load_with_fallback};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("connection refused")]
/// struct Refused;
///
/// impl Classify for Refused {
///     fn kind(&self) -> FetchErrorKind {
///         FetchErrorKind::Network
///     }
/// }
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let result = load_with_fallback(
///     async { Err::<Vec<u8>, _>(Refused) },
///     || async { Ok::<_, Refused>(vec![7]) },
/// )
/// .await;
/// assert_eq!(result, Ok(vec![7]));
/// # });
/// ```
pub async fn load_with_fallback<R, PF, PE, F, FF, FE>(primary: PF, fallback: F) -> FetchResult<R>
where
    PF: Future<Output = Result<Vec<R>, PE>>,
    PE: Classify,
    F: FnOnce() -> FF,
    FF: Future<Output = Result<Vec<R>, FE>>,
    FE: Classify,
{
    match primary.await {
        Ok(records) => {
            debug!(count = records.len(), source = "primary", "fetch succeeded");
            Ok(records)
        }
        Err(primary_error) if primary_error.is_fallback_eligible() => {
            warn!(error = %primary_error, "primary source unreachable; using fallback store");
            match fallback().await {
                Ok(records) => {
                    debug!(count = records.len(), source = "fallback", "fetch succeeded");
                    Ok(records)
                }
                Err(fallback_error) => {
                    error!(error = %fallback_error, "fallback source failed");
                    Err(FetchError::classify(&fallback_error))
                }
            }
        }
        Err(primary_error) => {
            error!(
                error = %primary_error,
                kind = ?primary_error.kind(),
                "primary source rejected the request"
            );
            Err(FetchError::classify(&primary_error))
        }
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
