//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the REST API, the document store, the identity provider, editable
//! collections). Each error enum is classified so orchestration code can tell
//! an outage from a rejection without inspecting messages.

mod macros;
pub(crate) use macros::define_port_error;

mod identity;
mod repository;
mod reservation_store;
mod service_center_api;

#[cfg(test)]
pub use identity::MockIdentityProvider;
pub use identity::{BearerToken, Identity, IdentityProvider, OwnerId};
pub use repository::{Repository, RepositoryError};
#[cfg(test)]
pub use reservation_store::MockReservationStore;
pub use reservation_store::{OwnerProfile, ReservationStore, ReservationStoreError};
#[cfg(test)]
pub use service_center_api::MockServiceCenterApi;
pub use service_center_api::{
    ServiceCenterApi, ServiceCenterApiError, ServiceCenterProfile, ServiceCenterReports,
};
