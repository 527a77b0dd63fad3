//! Driven port for the service-center REST API, the primary data path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::define_port_error;
use super::identity::BearerToken;
use crate::domain::{RecordId, Reservation, ReservationStatus};

/// Public profile of a service center.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCenterProfile {
    /// Service center identifier, when the API exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Remaining profile attributes, passed through untouched.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Report data for a service center, passed through as returned by the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCenterReports(pub Map<String, Value>);

define_port_error! {
    /// Errors surfaced while calling the service-center API.
    pub enum ServiceCenterApiError {
        /// The API could not be reached (connection refused, DNS failure).
        Unreachable { message: String } [Network] =>
            "service center API unreachable: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } [Network] =>
            "service center API timed out: {message}",
        /// The API reported that it is temporarily unavailable.
        Unavailable { message: String } [Network] =>
            "service center API unavailable: {message}",
        /// The API rejected the bearer credential.
        Unauthorized { message: String } [Auth] =>
            "not authorised by service center API: {message}",
        /// The API was reached but refused the request.
        Rejected { status: u16, message: String } [Server] =>
            "service center API rejected the request ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } [Server] =>
            "service center API response invalid: {message}",
    }
}

/// Port for the service-center REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceCenterApi: Send + Sync {
    /// Check whether the API is up. Requires no credential.
    async fn health_check(&self) -> Result<(), ServiceCenterApiError>;

    /// Fetch the signed-in center's profile.
    async fn fetch_profile(
        &self,
        token: &BearerToken,
    ) -> Result<ServiceCenterProfile, ServiceCenterApiError>;

    /// Replace the signed-in center's profile, returning the stored version.
    async fn update_profile(
        &self,
        token: &BearerToken,
        profile: &ServiceCenterProfile,
    ) -> Result<ServiceCenterProfile, ServiceCenterApiError>;

    /// Fetch the signed-in center's report data.
    async fn fetch_reports(
        &self,
        token: &BearerToken,
    ) -> Result<ServiceCenterReports, ServiceCenterApiError>;

    /// List reservations addressed to the signed-in center.
    async fn list_reservations(
        &self,
        token: &BearerToken,
    ) -> Result<Vec<Reservation>, ServiceCenterApiError>;

    /// Move a reservation to a new status, returning the updated record.
    async fn update_reservation_status(
        &self,
        token: &BearerToken,
        reservation_id: &RecordId,
        status: ReservationStatus,
    ) -> Result<Reservation, ServiceCenterApiError>;
}
