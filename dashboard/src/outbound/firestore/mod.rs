//! Document-store adapter used as the reservation fallback.
//!
//! Talks to the Firestore REST API directly, so reservations stay readable
//! while the service-center API is down.

mod dto;
mod store;

pub use store::{DEFAULT_FIRESTORE_BASE_URL, FirestoreReservationStore};
