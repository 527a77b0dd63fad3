//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **service_center**: reqwest client for the service-center REST API
//! - **firestore**: reqwest client for the document-store REST API, used as
//!   the reservation fallback
//! - **memory**: in-process repository and a fixed identity, for tests and
//!   local runs
//!
//! Adapters are thin translators between wire representations and domain
//! records. They contain no business logic.

pub mod firestore;
mod http_support;
pub mod memory;
mod reservation_dto;
pub mod service_center;

pub use http_support::AdapterBuildError;
