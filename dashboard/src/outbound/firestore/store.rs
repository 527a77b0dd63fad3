//! Reqwest-backed Firestore reservation store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::{Value, json};
use tracing::debug;

use super::dto::{DocumentDto, RunQueryItemDto};
use crate::domain::Reservation;
use crate::domain::ports::{Identity, OwnerProfile, ReservationStore, ReservationStoreError};
use crate::outbound::AdapterBuildError;
use crate::outbound::http_support::{api_root, endpoint, error_message};
use crate::outbound::reservation_dto::ReservationDto;

/// Public Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

const USERS_COLLECTION: &str = "users";
const RESERVATIONS_COLLECTION: &str = "servicereservations";
const SERVICE_CENTER_FIELD: &str = "serviceCenterId";

/// Reservation store reading one Firestore database over REST.
pub struct FirestoreReservationStore {
    client: Client,
    database: Url,
}

impl FirestoreReservationStore {
    /// Build a store for `project_id`'s default database.
    /// ```rust,ignore
    /// let store = FirestoreReservationStore::new(base_url, "servio-app", timeout)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry paths or the reqwest
    /// client cannot be constructed.
    pub fn new(
        base_url: Url,
        project_id: &str,
        timeout: Duration,
    ) -> Result<Self, AdapterBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        let root = api_root(base_url)?;
        let database = endpoint(&root, &["projects", project_id, "databases", "(default)", ""]);
        Ok(Self { client, database })
    }

    fn document_url(&self, collection: &str, id: &str) -> Url {
        endpoint(&self.database, &["documents", collection, id])
    }

    fn run_query_url(&self) -> Url {
        endpoint(&self.database, &["documents:runQuery"])
    }
}

#[async_trait]
impl ReservationStore for FirestoreReservationStore {
    async fn find_owner_profile(
        &self,
        identity: &Identity,
    ) -> Result<Option<OwnerProfile>, ReservationStoreError> {
        let response = self
            .client
            .get(self.document_url(USERS_COLLECTION, identity.uid.as_str()))
            .bearer_auth(identity.token.expose())
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            debug!(uid = %identity.uid, "no owner profile document");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let document: DocumentDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            ReservationStoreError::decode(format!("invalid user document: {error}"))
        })?;
        Ok(Some(document.into_owner_profile()))
    }

    async fn list_reservations(
        &self,
        identity: &Identity,
        service_center_id: &str,
    ) -> Result<Vec<Reservation>, ReservationStoreError> {
        let response = self
            .client
            .post(self.run_query_url())
            .bearer_auth(identity.token.expose())
            .json(&reservations_query(service_center_id))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let reservations = parse_reservations(body.as_ref())?;
        debug!(
            count = reservations.len(),
            %service_center_id,
            "listed reservations from document store"
        );
        Ok(reservations)
    }
}

fn reservations_query(service_center_id: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": RESERVATIONS_COLLECTION }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": SERVICE_CENTER_FIELD },
                    "op": "EQUAL",
                    "value": { "stringValue": service_center_id }
                }
            }
        }
    })
}

fn parse_reservations(body: &[u8]) -> Result<Vec<Reservation>, ReservationStoreError> {
    let items: Vec<RunQueryItemDto> = serde_json::from_slice(body).map_err(|error| {
        ReservationStoreError::decode(format!("invalid runQuery payload: {error}"))
    })?;
    items
        .into_iter()
        .filter_map(|item| item.document)
        .map(|document| {
            let id = document.id().to_owned();
            let dto: ReservationDto = serde_json::from_value(Value::Object(document.into_json()))
                .map_err(|error| {
                    ReservationStoreError::decode(format!("reservation {id}: {error}"))
                })?;
            dto.into_domain(Some(id.as_str()))
                .map_err(ReservationStoreError::decode)
        })
        .collect()
}

fn map_transport_error(error: reqwest::Error) -> ReservationStoreError {
    if error.is_decode() {
        ReservationStoreError::decode(error.to_string())
    } else {
        ReservationStoreError::unavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ReservationStoreError {
    let detail = error_message(body);
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {detail}", status.as_u16())
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ReservationStoreError::unauthorized(message)
        }
        StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => ReservationStoreError::unavailable(message),
        _ => ReservationStoreError::query(message),
    }
}
