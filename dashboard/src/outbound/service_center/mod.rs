//! Service-center REST API adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `ServiceCenterApi` port.

mod dto;
mod http_api;

pub use http_api::{DEFAULT_HEALTH_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, ServiceCenterHttpApi};
