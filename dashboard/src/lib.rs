//! Data layer for the Servio service-center dashboard.
//!
//! - [`domain`]: typed records, filtering, derived statistics, and the
//!   primary/fallback reservation feed.
//! - [`outbound`]: REST, document-store and in-memory adapters for the
//!   domain ports.
//! - [`config`]: runtime settings loaded via OrthoConfig.

pub mod config;
pub mod domain;
pub mod outbound;
