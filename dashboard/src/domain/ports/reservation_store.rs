//! Driven port for querying reservations directly from the document store.
//!
//! This is the fallback data path used while the REST API is unreachable.
//! Queries are scoped server-side to one service center.

use async_trait::async_trait;

use super::define_port_error;
use super::identity::Identity;
use crate::domain::Reservation;

/// Operator profile document kept by the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProfile {
    /// Service center the operator manages, when recorded.
    pub service_center_id: Option<String>,
    /// Display name, when recorded.
    pub display_name: Option<String>,
}

define_port_error! {
    /// Errors surfaced while querying the document store.
    pub enum ReservationStoreError {
        /// The store could not be reached.
        Unavailable { message: String } [Network] =>
            "reservation store unavailable: {message}",
        /// The store rejected the credential.
        Unauthorized { message: String } [Auth] =>
            "not authorised by reservation store: {message}",
        /// The operator has no profile document.
        ProfileNotFound { uid: String } [NotFound] =>
            "User profile not found",
        /// The store refused or failed the query.
        Query { message: String } [Server] =>
            "reservation store query failed: {message}",
        /// A stored document could not be mapped into a record.
        Decode { message: String } [Server] =>
            "reservation store document invalid: {message}",
    }
}

/// Port for direct document-store reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Look up the operator's profile document.
    async fn find_owner_profile(
        &self,
        identity: &Identity,
    ) -> Result<Option<OwnerProfile>, ReservationStoreError>;

    /// List reservations whose service center matches `service_center_id`.
    async fn list_reservations(
        &self,
        identity: &Identity,
        service_center_id: &str,
    ) -> Result<Vec<Reservation>, ReservationStoreError>;
}
