//! Print the signed-in service center's reservation dashboard as JSON.
//!
//! Reservations come from the service-center API, or from the document store
//! while the API is unreachable. Failures are reported on stderr with a
//! non-zero exit status; an empty dashboard is only printed when there really
//! are no reservations.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use dashboard::config::DashboardSettings;
use dashboard::domain::ports::{
    BearerToken, Identity, IdentityProvider, OwnerId, OwnerProfile, ReservationStore,
    ReservationStoreError,
};
use dashboard::domain::{
    FetchError, FetchErrorKind, FilterSpec, Reservation, ReservationFeed, ReservationFeedPorts,
    ReservationStatus,
};
use dashboard::outbound::firestore::FirestoreReservationStore;
use dashboard::outbound::memory::StaticIdentityProvider;
use dashboard::outbound::service_center::ServiceCenterHttpApi;
use ortho_config::OrthoConfig;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `dashboard-snapshot` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard-snapshot",
    about = "Print the service-center reservation dashboard as JSON",
    version
)]
struct CliArgs {
    /// Reservation status to show, or `All`.
    #[arg(
        long = "status",
        value_name = "status",
        default_value = "All",
        value_parser = parse_status_filter
    )]
    status: FilterSpec<ReservationStatus>,
}

#[derive(Debug, Error)]
enum SnapshotError {
    #[error("invalid arguments: {0}")]
    Arguments(#[from] clap::Error),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("failed to write dashboard: {0}")]
    Output(#[from] io::Error),
}

impl SnapshotError {
    fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(error) => match error.kind() {
                FetchErrorKind::Network => Some("Check that the server is running, then retry."),
                FetchErrorKind::Auth => {
                    Some("Set SERVIO_UID and a fresh SERVIO_ID_TOKEN, then retry.")
                }
                FetchErrorKind::NotFound => {
                    Some("Complete the service center profile, then retry.")
                }
                FetchErrorKind::Server => Some("Retry later."),
            },
            Self::Configuration(_) => Some("See SERVIO_* settings."),
            Self::Arguments(_) | Self::Output(_) => None,
        }
    }
}

fn main() -> ExitCode {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let outcome = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SnapshotError::Output)
        .and_then(|runtime| runtime.block_on(run()));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(SnapshotError::Arguments(error)) => {
            // clap renders help and version output through its own error path.
            if error.print().is_err() {
                return ExitCode::FAILURE;
            }
            if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SnapshotError> {
    let args = CliArgs::try_parse()?;
    let settings = DashboardSettings::load_from_iter([OsString::from("dashboard-snapshot")])
        .map_err(|error| SnapshotError::Configuration(error.to_string()))?;

    let feed = build_feed(&settings)?;
    let view = feed.view(&args.status).await?;
    info!(
        shown = view.filtered.len(),
        flagged = view.flagged.len(),
        "reservation dashboard loaded"
    );

    let rendered = serde_json::to_string_pretty(&view).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

fn build_feed(settings: &DashboardSettings) -> Result<ReservationFeed, SnapshotError> {
    let configuration =
        |error: &dyn std::fmt::Display| SnapshotError::Configuration(error.to_string());

    let api = ServiceCenterHttpApi::new(
        settings.api_base_url().map_err(|error| configuration(&error))?,
        settings.request_timeout(),
        settings.health_check_timeout(),
    )
    .map_err(|error| configuration(&error))?;

    let store: Arc<dyn ReservationStore> = match settings.firestore_project_id() {
        Some(project_id) => Arc::new(
            FirestoreReservationStore::new(
                settings
                    .firestore_base_url()
                    .map_err(|error| configuration(&error))?,
                project_id,
                settings.request_timeout(),
            )
            .map_err(|error| configuration(&error))?,
        ),
        None => Arc::new(UnconfiguredStore),
    };

    Ok(ReservationFeed::new(ReservationFeedPorts {
        identity: identity_from(settings),
        api: Arc::new(api),
        store,
    }))
}

fn identity_from(settings: &DashboardSettings) -> Arc<dyn IdentityProvider> {
    let identity = settings
        .uid()
        .zip(settings.id_token())
        .and_then(|(uid, token)| {
            Some(Identity {
                uid: OwnerId::new(uid).ok()?,
                token: BearerToken::new(token).ok()?,
            })
        });
    match identity {
        Some(identity) => Arc::new(StaticIdentityProvider::signed_in(identity)),
        None => Arc::new(StaticIdentityProvider::signed_out()),
    }
}

fn parse_status_filter(raw: &str) -> Result<FilterSpec<ReservationStatus>, String> {
    FilterSpec::parse(raw, str::parse::<ReservationStatus>).map_err(|error| error.to_string())
}

fn report(error: &SnapshotError) {
    let mut stderr = io::stderr().lock();
    let written = match error.hint() {
        Some(hint) => writeln!(stderr, "dashboard-snapshot: {error}\n{hint}"),
        None => writeln!(stderr, "dashboard-snapshot: {error}"),
    };
    if written.is_err() {
        warn!(%error, "failed to report error on stderr");
    }
}

/// Fallback store used when no document-store project is configured.
struct UnconfiguredStore;

#[async_trait]
impl ReservationStore for UnconfiguredStore {
    async fn find_owner_profile(
        &self,
        _identity: &Identity,
    ) -> Result<Option<OwnerProfile>, ReservationStoreError> {
        Err(not_configured())
    }

    async fn list_reservations(
        &self,
        _identity: &Identity,
        _service_center_id: &str,
    ) -> Result<Vec<Reservation>, ReservationStoreError> {
        Err(not_configured())
    }
}

fn not_configured() -> ReservationStoreError {
    ReservationStoreError::unavailable(
        "document store not configured; set SERVIO_FIRESTORE_PROJECT_ID",
    )
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("All", FilterSpec::All)]
    #[case("pending", FilterSpec::Equals(ReservationStatus::Pending))]
    #[case("CANCELLED", FilterSpec::Equals(ReservationStatus::Cancelled))]
    fn status_filters_parse(#[case] raw: &str, #[case] expected: FilterSpec<ReservationStatus>) {
        assert_eq!(parse_status_filter(raw), Ok(expected));
    }

    #[test]
    fn unknown_status_filters_are_rejected() {
        let error = parse_status_filter("archived").expect_err("unknown status");
        assert!(error.contains("archived"));
    }

    #[rstest]
    #[case(FetchError::network("down"), "retry")]
    #[case(FetchError::auth("User not authenticated"), "SERVIO_ID_TOKEN")]
    fn fetch_failures_carry_hints(#[case] error: FetchError, #[case] expected: &str) {
        let hint = SnapshotError::Fetch(error).hint().expect("hint present");
        assert!(hint.contains(expected), "unexpected hint: {hint}");
    }

    #[tokio::test]
    async fn unconfigured_store_reports_an_outage() {
        let identity = Identity {
            uid: OwnerId::new("uid").expect("valid uid"),
            token: BearerToken::new("token").expect("valid token"),
        };
        let error = UnconfiguredStore
            .list_reservations(&identity, "uid")
            .await
            .expect_err("not configured");
        assert!(matches!(error, ReservationStoreError::Unavailable { .. }));
    }
}
