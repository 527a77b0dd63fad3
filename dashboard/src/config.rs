//! Dashboard configuration loaded via OrthoConfig.
//!
//! Every value may come from `SERVIO_*` environment variables, a config file
//! or CLI flags; unset values fall back to the local development defaults.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::outbound::firestore::DEFAULT_FIRESTORE_BASE_URL;
use crate::outbound::service_center::{DEFAULT_HEALTH_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Settings for reaching the service-center API and the document store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVIO")]
pub struct DashboardSettings {
    /// Root URL of the service-center REST API.
    pub api_base_url: Option<String>,
    /// Timeout for the API health check, in milliseconds.
    pub health_check_timeout_ms: Option<u64>,
    /// Timeout for every other request, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Root URL of the document-store REST API.
    pub firestore_base_url: Option<String>,
    /// Document-store project identifier.
    pub firestore_project_id: Option<String>,
    /// Bearer token issued by the identity provider.
    pub id_token: Option<String>,
    /// Signed-in operator uid.
    pub uid: Option<String>,
}

impl DashboardSettings {
    /// Return the API root, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Return the document-store root, falling back to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a URL.
    pub fn firestore_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.firestore_base_url
                .as_deref()
                .unwrap_or(DEFAULT_FIRESTORE_BASE_URL),
        )
    }

    /// Return the health-check timeout.
    pub fn health_check_timeout(&self) -> Duration {
        self.health_check_timeout_ms
            .map_or(DEFAULT_HEALTH_TIMEOUT, Duration::from_millis)
    }

    /// Return the timeout for regular requests.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_ms
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_millis)
    }

    /// Return the document-store project, when configured.
    pub fn firestore_project_id(&self) -> Option<&str> {
        non_blank(self.firestore_project_id.as_deref())
    }

    /// Return the configured bearer token, when present.
    pub fn id_token(&self) -> Option<&str> {
        non_blank(self.id_token.as_deref())
    }

    /// Return the configured operator uid, when present.
    pub fn uid(&self) -> Option<&str> {
        non_blank(self.uid.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
