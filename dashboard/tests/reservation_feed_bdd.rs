//! Behavioural tests for the reservation feed.
//!
//! These scenarios drive the feed through test-local port fakes and check
//! which source answered, and which failures are absorbed by the fallback.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashboard::domain::ports::{
    BearerToken, Identity, OwnerId, OwnerProfile, ReservationStore, ReservationStoreError,
    ServiceCenterApi, ServiceCenterApiError, ServiceCenterProfile, ServiceCenterReports,
};
use dashboard::domain::{
    FetchError, FetchErrorKind, RecordId, Reservation, ReservationFeed, ReservationFeedPorts,
    ReservationStatus,
};
use dashboard::outbound::memory::StaticIdentityProvider;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Builder;

// ============================================================================
// Port fakes
// ============================================================================

fn reservations(prefix: &str, count: usize) -> Vec<Reservation> {
    (1..=count)
        .map(|index| Reservation {
            id: RecordId::new(format!("{prefix}-{index}")).expect("valid id"),
            customer: format!("Customer {index}"),
            service: "Oil Change".to_owned(),
            service_date: None,
            status: ReservationStatus::Pending,
            contact: String::new(),
            cost: None,
            service_center_id: Some("center-9".to_owned()),
        })
        .collect()
}

#[derive(Debug, Clone)]
enum ApiBehaviour {
    Returns(usize),
    Unreachable,
    RejectsCredential,
}

#[derive(Debug, Clone)]
enum StoreBehaviour {
    Holds(usize),
    Unavailable,
}

struct FakeApi {
    behaviour: ApiBehaviour,
    calls: AtomicUsize,
}

#[async_trait]
impl ServiceCenterApi for FakeApi {
    async fn health_check(&self) -> Result<(), ServiceCenterApiError> {
        Ok(())
    }

    async fn fetch_profile(
        &self,
        _token: &BearerToken,
    ) -> Result<ServiceCenterProfile, ServiceCenterApiError> {
        Ok(ServiceCenterProfile::default())
    }

    async fn update_profile(
        &self,
        _token: &BearerToken,
        profile: &ServiceCenterProfile,
    ) -> Result<ServiceCenterProfile, ServiceCenterApiError> {
        Ok(profile.clone())
    }

    async fn fetch_reports(
        &self,
        _token: &BearerToken,
    ) -> Result<ServiceCenterReports, ServiceCenterApiError> {
        Ok(ServiceCenterReports::default())
    }

    async fn list_reservations(
        &self,
        _token: &BearerToken,
    ) -> Result<Vec<Reservation>, ServiceCenterApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            ApiBehaviour::Returns(count) => Ok(reservations("api", count)),
            ApiBehaviour::Unreachable => Err(ServiceCenterApiError::unreachable(
                "connection refused",
            )),
            ApiBehaviour::RejectsCredential => {
                Err(ServiceCenterApiError::unauthorized("token expired"))
            }
        }
    }

    async fn update_reservation_status(
        &self,
        _token: &BearerToken,
        reservation_id: &RecordId,
        _status: ReservationStatus,
    ) -> Result<Reservation, ServiceCenterApiError> {
        Err(ServiceCenterApiError::rejected(
            404_u16,
            format!("unknown reservation {reservation_id}"),
        ))
    }
}

struct FakeStore {
    behaviour: StoreBehaviour,
    queries: AtomicUsize,
}

#[async_trait]
impl ReservationStore for FakeStore {
    async fn find_owner_profile(
        &self,
        _identity: &Identity,
    ) -> Result<Option<OwnerProfile>, ReservationStoreError> {
        Ok(Some(OwnerProfile {
            service_center_id: Some("center-9".to_owned()),
            display_name: None,
        }))
    }

    async fn list_reservations(
        &self,
        _identity: &Identity,
        _service_center_id: &str,
    ) -> Result<Vec<Reservation>, ReservationStoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            StoreBehaviour::Holds(count) => Ok(reservations("store", count)),
            StoreBehaviour::Unavailable => {
                Err(ReservationStoreError::unavailable("deadline exceeded"))
            }
        }
    }
}

// ============================================================================
// Test world
// ============================================================================

#[derive(Default, ScenarioState)]
struct FeedWorld {
    signed_in: Slot<bool>,
    api_behaviour: Slot<ApiBehaviour>,
    store_behaviour: Slot<StoreBehaviour>,
    api: Slot<Arc<FakeApi>>,
    store: Slot<Arc<FakeStore>>,
    outcome: Slot<Result<Vec<Reservation>, FetchError>>,
}

impl FeedWorld {
    fn identity_provider(&self) -> StaticIdentityProvider {
        if self.signed_in.get().expect("identity should be chosen") {
            StaticIdentityProvider::signed_in(Identity {
                uid: OwnerId::new("owner-42").expect("valid uid"),
                token: BearerToken::new("token-abc").expect("valid token"),
            })
        } else {
            StaticIdentityProvider::signed_out()
        }
    }

    fn load(&self) {
        let api = Arc::new(FakeApi {
            behaviour: self.api_behaviour.get().expect("API behaviour should be set"),
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(FakeStore {
            behaviour: self
                .store_behaviour
                .get()
                .expect("store behaviour should be set"),
            queries: AtomicUsize::new(0),
        });
        let feed = ReservationFeed::new(ReservationFeedPorts {
            identity: Arc::new(self.identity_provider()),
            api: api.clone(),
            store: store.clone(),
        });

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime should initialize");
        let outcome = runtime.block_on(feed.load());

        self.api.set(api);
        self.store.set(store);
        self.outcome.set(outcome);
    }

    fn failure_kind(&self) -> FetchErrorKind {
        self.outcome
            .get()
            .expect("feed should have loaded")
            .expect_err("load should fail")
            .kind()
    }
}

#[fixture]
fn world() -> FeedWorld {
    FeedWorld::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a signed-in operator")]
fn a_signed_in_operator(world: &FeedWorld) {
    world.signed_in.set(true);
}

#[given("a signed-out operator")]
fn a_signed_out_operator(world: &FeedWorld) {
    world.signed_in.set(false);
}

#[given("the API returns {count} reservations")]
fn the_api_returns_reservations(world: &FeedWorld, count: usize) {
    world.api_behaviour.set(ApiBehaviour::Returns(count));
}

#[given("the API is unreachable")]
fn the_api_is_unreachable(world: &FeedWorld) {
    world.api_behaviour.set(ApiBehaviour::Unreachable);
}

#[given("the API rejects the credential")]
fn the_api_rejects_the_credential(world: &FeedWorld) {
    world.api_behaviour.set(ApiBehaviour::RejectsCredential);
}

#[given("the document store holds {count} reservations")]
fn the_document_store_holds_reservations(world: &FeedWorld, count: usize) {
    world.store_behaviour.set(StoreBehaviour::Holds(count));
}

#[given("the document store is unavailable")]
fn the_document_store_is_unavailable(world: &FeedWorld) {
    world.store_behaviour.set(StoreBehaviour::Unavailable);
}

// ============================================================================
// When steps
// ============================================================================

#[when("the reservation feed loads")]
fn the_reservation_feed_loads(world: &FeedWorld) {
    world.load();
}

// ============================================================================
// Then steps
// ============================================================================

#[then("{count} reservations are returned")]
fn reservations_are_returned(world: &FeedWorld, count: usize) {
    let records = world
        .outcome
        .get()
        .expect("feed should have loaded")
        .expect("load should succeed");
    assert_eq!(records.len(), count);
}

#[then("the API was called {count} times")]
fn the_api_was_called(world: &FeedWorld, count: usize) {
    let api = world.api.get().expect("feed should have loaded");
    assert_eq!(api.calls.load(Ordering::SeqCst), count);
}

#[then("the document store was queried {count} times")]
fn the_document_store_was_queried(world: &FeedWorld, count: usize) {
    let store = world.store.get().expect("feed should have loaded");
    assert_eq!(store.queries.load(Ordering::SeqCst), count);
}

#[then("the load fails with an auth error")]
fn the_load_fails_with_an_auth_error(world: &FeedWorld) {
    assert_eq!(world.failure_kind(), FetchErrorKind::Auth);
}

#[then("the load fails with a network error")]
fn the_load_fails_with_a_network_error(world: &FeedWorld) {
    assert_eq!(world.failure_kind(), FetchErrorKind::Network);
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/reservation_feed.feature",
    name = "Reservations come from the API while it is reachable"
)]
fn reservations_come_from_the_api(world: FeedWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reservation_feed.feature",
    name = "An unreachable API falls back to the document store"
)]
fn unreachable_api_falls_back(world: FeedWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reservation_feed.feature",
    name = "A rejected credential does not fall back"
)]
fn rejected_credential_does_not_fall_back(world: FeedWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reservation_feed.feature",
    name = "A signed-out operator makes no calls"
)]
fn signed_out_operator_makes_no_calls(world: FeedWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reservation_feed.feature",
    name = "Both sources down surfaces the document-store failure"
)]
fn both_sources_down(world: FeedWorld) {
    let _ = world;
}
