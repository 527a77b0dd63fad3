//! Reqwest-backed service-center API adapter.
//!
//! This adapter owns transport details only: routes, bearer headers, timeout
//! and HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{ReservationEnvelopeDto, ReservationListDto, StatusUpdateDto};
use crate::domain::ports::{
    BearerToken, ServiceCenterApi, ServiceCenterApiError, ServiceCenterProfile,
    ServiceCenterReports,
};
use crate::domain::{RecordId, Reservation, ReservationStatus};
use crate::outbound::http_support::{api_root, endpoint, error_message};
use crate::outbound::AdapterBuildError;

/// Timeout applied to the health check.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(2_000);
/// Timeout applied to every other request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5_000);

const SERVICE_CENTERS_SEGMENT: &str = "service-centers";
const RESERVATIONS_SEGMENT: &str = "reservations";
const STATUS_SEGMENT: &str = "status";

const HEALTH_ROUTE: &[&str] = &["health-check"];
const HEALTH_FALLBACK_ROUTE: &[&str] = &[SERVICE_CENTERS_SEGMENT];
const PROFILE_ROUTE: &[&str] = &[SERVICE_CENTERS_SEGMENT, "profile"];
const REPORTS_ROUTE: &[&str] = &[SERVICE_CENTERS_SEGMENT, "reports"];
const RESERVATIONS_ROUTE: &[&str] = &[SERVICE_CENTERS_SEGMENT, RESERVATIONS_SEGMENT];

/// Service-center API adapter rooted at one base URL.
pub struct ServiceCenterHttpApi {
    client: Client,
    root: Url,
    health_timeout: Duration,
}

impl ServiceCenterHttpApi {
    /// Build an adapter with explicit request and health-check timeouts.
    /// ```rust,ignore
    /// let api = ServiceCenterHttpApi::new(base_url, request_timeout, health_timeout)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry paths or the reqwest
    /// client cannot be constructed.
    pub fn new(
        base_url: Url,
        request_timeout: Duration,
        health_timeout: Duration,
    ) -> Result<Self, AdapterBuildError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            root: api_root(base_url)?,
            health_timeout,
        })
    }

    async fn ping(&self, route: &[&str]) -> Result<(), ServiceCenterApiError> {
        let url = endpoint(&self.root, route);
        debug!(%url, "pinging service center API");
        let response = self
            .client
            .get(url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

#[async_trait]
impl ServiceCenterApi for ServiceCenterHttpApi {
    async fn health_check(&self) -> Result<(), ServiceCenterApiError> {
        match self.ping(HEALTH_ROUTE).await {
            Ok(()) => Ok(()),
            Err(error) => {
                debug!(%error, "health route failed; trying service center listing");
                self.ping(HEALTH_FALLBACK_ROUTE).await
            }
        }
    }

    async fn fetch_profile(
        &self,
        token: &BearerToken,
    ) -> Result<ServiceCenterProfile, ServiceCenterApiError> {
        let request = self.client.get(endpoint(&self.root, PROFILE_ROUTE));
        send_json(authorised(request, token)).await
    }

    async fn update_profile(
        &self,
        token: &BearerToken,
        profile: &ServiceCenterProfile,
    ) -> Result<ServiceCenterProfile, ServiceCenterApiError> {
        let request = self
            .client
            .put(endpoint(&self.root, PROFILE_ROUTE))
            .json(profile);
        send_json(authorised(request, token)).await
    }

    async fn fetch_reports(
        &self,
        token: &BearerToken,
    ) -> Result<ServiceCenterReports, ServiceCenterApiError> {
        let request = self.client.get(endpoint(&self.root, REPORTS_ROUTE));
        send_json(authorised(request, token)).await
    }

    async fn list_reservations(
        &self,
        token: &BearerToken,
    ) -> Result<Vec<Reservation>, ServiceCenterApiError> {
        let request = self.client.get(endpoint(&self.root, RESERVATIONS_ROUTE));
        let listed: ReservationListDto = send_json(authorised(request, token)).await?;
        let reservations = listed
            .into_items()
            .into_iter()
            .map(|dto| dto.into_domain(None))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ServiceCenterApiError::decode)?;
        debug!(count = reservations.len(), "listed reservations from API");
        Ok(reservations)
    }

    async fn update_reservation_status(
        &self,
        token: &BearerToken,
        reservation_id: &RecordId,
        status: ReservationStatus,
    ) -> Result<Reservation, ServiceCenterApiError> {
        let route = [
            SERVICE_CENTERS_SEGMENT,
            RESERVATIONS_SEGMENT,
            reservation_id.as_str(),
            STATUS_SEGMENT,
        ];
        let request = self
            .client
            .put(endpoint(&self.root, &route))
            .json(&StatusUpdateDto { status });
        let updated: ReservationEnvelopeDto =
            send_json(authorised(request, token)).await?;
        updated
            .into_item()
            .into_domain(Some(reservation_id.as_str()))
            .map_err(ServiceCenterApiError::decode)
    }
}

fn authorised(request: RequestBuilder, token: &BearerToken) -> RequestBuilder {
    request
        .bearer_auth(token.expose())
        .header(ACCEPT, HeaderValue::from_static("application/json"))
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, ServiceCenterApiError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| {
        ServiceCenterApiError::decode(format!("invalid service center JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> ServiceCenterApiError {
    if error.is_timeout() {
        ServiceCenterApiError::timeout(error.to_string())
    } else if error.is_decode() {
        ServiceCenterApiError::decode(error.to_string())
    } else {
        ServiceCenterApiError::unreachable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ServiceCenterApiError {
    let detail = error_message(body);
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        detail
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ServiceCenterApiError::unauthorized(message)
        }
        StatusCode::SERVICE_UNAVAILABLE => ServiceCenterApiError::unavailable(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ServiceCenterApiError::timeout(message)
        }
        _ => ServiceCenterApiError::rejected(status.as_u16(), message),
    }
}
