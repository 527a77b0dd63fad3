//! Reservation feed for the service-center dashboard.
//!
//! Reads go to the REST API first and fall back to the document store while
//! the API is unreachable. Writes go to the REST API only.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::fetch::{Classify, FetchError, FetchResult, FetchWithFallback};
use super::filter::FilterSpec;
use super::ports::{
    Identity, IdentityProvider, ReservationStore, ReservationStoreError, ServiceCenterApi,
    ServiceCenterProfile, ServiceCenterReports,
};
use super::record::RecordId;
use super::reservation::{Reservation, ReservationStatus};
use super::stats::DerivedStatsView;

/// Message returned when the health check fails.
pub const BACKEND_UNAVAILABLE: &str =
    "Backend server unavailable. Please check if the server is running.";

/// Driven ports required by [`ReservationFeed`].
#[derive(Clone)]
pub struct ReservationFeedPorts {
    /// Source of the signed-in identity.
    pub identity: Arc<dyn IdentityProvider>,
    /// Primary REST API.
    pub api: Arc<dyn ServiceCenterApi>,
    /// Document-store fallback.
    pub store: Arc<dyn ReservationStore>,
}

/// Loads, derives and edits the signed-in center's reservations.
#[derive(Clone)]
pub struct ReservationFeed {
    fetcher: FetchWithFallback<dyn IdentityProvider>,
    api: Arc<dyn ServiceCenterApi>,
    store: Arc<dyn ReservationStore>,
}

impl ReservationFeed {
    /// Create a feed over the given ports.
    pub fn new(ports: ReservationFeedPorts) -> Self {
        let ReservationFeedPorts {
            identity,
            api,
            store,
        } = ports;
        Self {
            fetcher: FetchWithFallback::new(identity),
            api,
            store,
        }
    }

    /// Load every reservation addressed to the signed-in center.
    pub async fn load(&self) -> FetchResult<Reservation> {
        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);
        self.fetcher
            .load(
                move |identity| async move { api.list_reservations(&identity.token).await },
                move |identity| async move { load_from_store(store.as_ref(), &identity).await },
            )
            .await
    }

    /// Load reservations and derive the dashboard view.
    ///
    /// A failed load is returned as-is; it is never rendered as an empty
    /// view.
    pub async fn view(
        &self,
        filter: &FilterSpec<ReservationStatus>,
    ) -> Result<DerivedStatsView<Reservation>, FetchError> {
        let records = self.load().await?;
        Ok(DerivedStatsView::compute(&records, filter))
    }

    /// Fetch the signed-in center's profile after a short health check.
    pub async fn profile(&self) -> Result<ServiceCenterProfile, FetchError> {
        let identity = self.fetcher.require_identity().await?;
        if let Err(health_error) = self.api.health_check().await {
            warn!(error = %health_error, "service center API failed its health check");
            return Err(FetchError::network(BACKEND_UNAVAILABLE));
        }
        self.api
            .fetch_profile(&identity.token)
            .await
            .map_err(|err| surface("fetch_profile", &err))
    }

    /// Replace the signed-in center's profile.
    pub async fn update_profile(
        &self,
        profile: &ServiceCenterProfile,
    ) -> Result<ServiceCenterProfile, FetchError> {
        let identity = self.fetcher.require_identity().await?;
        self.api
            .update_profile(&identity.token, profile)
            .await
            .map_err(|err| surface("update_profile", &err))
    }

    /// Fetch the signed-in center's report data.
    pub async fn reports(&self) -> Result<ServiceCenterReports, FetchError> {
        let identity = self.fetcher.require_identity().await?;
        self.api
            .fetch_reports(&identity.token)
            .await
            .map_err(|err| surface("fetch_reports", &err))
    }

    /// Move one reservation to `status`.
    pub async fn update_status(
        &self,
        reservation_id: &RecordId,
        status: ReservationStatus,
    ) -> Result<Reservation, FetchError> {
        let identity = self.fetcher.require_identity().await?;
        debug!(%reservation_id, %status, "updating reservation status");
        self.api
            .update_reservation_status(&identity.token, reservation_id, status)
            .await
            .map_err(|err| surface("update_reservation_status", &err))
    }
}

async fn load_from_store(
    store: &dyn ReservationStore,
    identity: &Identity,
) -> Result<Vec<Reservation>, ReservationStoreError> {
    let profile = store
        .find_owner_profile(identity)
        .await?
        .ok_or_else(|| ReservationStoreError::profile_not_found(identity.uid.as_str()))?;
    let service_center_id = profile
        .service_center_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| identity.uid.to_string());
    debug!(%service_center_id, "querying reservation store");
    store.list_reservations(identity, &service_center_id).await
}

fn surface<E: Classify>(operation: &'static str, err: &E) -> FetchError {
    error!(operation, error = %err, kind = ?err.kind(), "service center API call failed");
    FetchError::classify(err)
}

#[cfg(test)]
#[path = "reservation_feed_tests.rs"]
mod tests;
