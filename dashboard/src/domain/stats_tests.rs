//! Tests for derived dashboard views.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    PartCategory, Reservation, ReservationStatus, ServiceOffering, ServiceStatus, SparePart,
};

fn money(raw: &str) -> Money {
    raw.parse().expect("test amount should parse")
}

fn service(id: &str, status: ServiceStatus, cost: Option<&str>) -> ServiceOffering {
    ServiceOffering {
        id: RecordId::new(id).expect("valid id"),
        title: format!("Service {id}"),
        description: String::new(),
        image: None,
        status,
        cost: cost.map(money),
    }
}

fn part(id: &str, category: &str, quantity: u32, price: &str, threshold: u32) -> SparePart {
    SparePart {
        id: RecordId::new(id).expect("valid id"),
        name: format!("Part {id}"),
        category: PartCategory::new(category).expect("valid category"),
        quantity: Some(quantity),
        price: Some(money(price)),
        threshold: Some(threshold),
        image: None,
    }
}

fn reservation(id: &str, status: ReservationStatus) -> Reservation {
    Reservation {
        id: RecordId::new(id).expect("valid id"),
        customer: "John Doe".to_owned(),
        service: "Oil Change".to_owned(),
        service_date: None,
        status,
        contact: "555-1234".to_owned(),
        cost: Some(money("49.99")),
        service_center_id: None,
    }
}

#[fixture]
fn services() -> Vec<ServiceOffering> {
    vec![
        service("1", ServiceStatus::Active, Some("150")),
        service("2", ServiceStatus::Inactive, Some("80")),
        service("3", ServiceStatus::Active, Some("50")),
    ]
}

#[rstest]
fn active_filter_keeps_order_and_global_totals(services: Vec<ServiceOffering>) {
    let view = DerivedStatsView::compute(&services, &FilterSpec::Equals(ServiceStatus::Active));

    let costs: Vec<String> = view
        .filtered
        .iter()
        .filter_map(|offering| offering.cost.map(|cost| cost.to_string()))
        .collect();
    assert_eq!(costs, vec!["150.00", "50.00"]);
    assert_eq!(view.stats.amount("totalCost"), Some(money("280.00")));
    assert_eq!(view.stats.count("totalCount"), Some(3));
    assert_eq!(view.stats.count("activeCount"), Some(2));
    assert_eq!(view.stats.count("inactiveCount"), Some(1));
}

#[rstest]
fn no_filter_returns_collection_unchanged(services: Vec<ServiceOffering>) {
    let view = DerivedStatsView::compute(&services, &FilterSpec::All);
    assert_eq!(view.filtered, services);
}

#[rstest]
fn filtering_twice_is_idempotent(services: Vec<ServiceOffering>) {
    let filter = FilterSpec::Equals(ServiceStatus::Inactive);
    let once = DerivedStatsView::compute(&services, &filter);
    let twice = DerivedStatsView::compute(&once.filtered, &filter);

    assert_eq!(once.filtered, twice.filtered);
    assert!(
        once.filtered
            .iter()
            .all(|offering| offering.status == ServiceStatus::Inactive)
    );
}

#[test]
fn empty_collections_produce_zero_metrics() {
    let view = DerivedStatsView::<Reservation>::compute(&[], &FilterSpec::All);

    assert!(view.filtered.is_empty());
    for name in ["pendingCount", "confirmedCount", "completedCount", "cancelledCount"] {
        assert_eq!(view.stats.count(name), Some(0), "{name} should be zero");
    }
    let total = view.stats.amount("totalValue").expect("sum metric present");
    assert_eq!(total.to_string(), "0.00");
}

#[test]
fn missing_amounts_count_as_zero() {
    let services = vec![
        service("1", ServiceStatus::Active, None),
        service("2", ServiceStatus::Active, Some("19.995")),
    ];
    let view = DerivedStatsView::compute(&services, &FilterSpec::All);
    assert_eq!(
        view.stats.amount("totalCost").map(|total| total.to_string()),
        Some("20.00".to_owned())
    );
}

#[test]
fn spare_parts_flag_low_stock_per_record() {
    let parts = vec![
        part("1", "Engine", 45, "15.99", 10),
        part("2", "Brakes", 12, "45.50", 5),
        part("3", "Engine", 30, "12.99", 8),
        part("4", "Ignition", 8, "7.99", 10),
    ];
    let engine = PartCategory::new("Engine").expect("valid category");
    let view = DerivedStatsView::compute(&parts, &FilterSpec::Equals(engine));

    assert_eq!(view.filtered.len(), 2);
    assert_eq!(view.flagged, vec![RecordId::new("4").expect("valid id")]);
    assert!(view.is_flagged(&RecordId::new("4").expect("valid id")));
    assert_eq!(view.stats.count("lowStockCount"), Some(1));
    assert_eq!(view.stats.count("totalUnits"), Some(95));
    assert_eq!(
        view.stats.amount("inventoryValue"),
        Some(money("1719.17"))
    );
}

#[test]
fn reservation_counts_cover_every_status() {
    let reservations = vec![
        reservation("1", ReservationStatus::Pending),
        reservation("2", ReservationStatus::Confirmed),
        reservation("3", ReservationStatus::Completed),
        reservation("4", ReservationStatus::Pending),
    ];
    let view = DerivedStatsView::compute(
        &reservations,
        &FilterSpec::Equals(ReservationStatus::Cancelled),
    );

    assert!(view.filtered.is_empty());
    assert_eq!(view.stats.count("pendingCount"), Some(2));
    assert_eq!(view.stats.count("cancelledCount"), Some(0));
    assert_eq!(view.stats.amount("totalValue"), Some(money("199.96")));
}

#[rstest]
fn stats_serialise_as_a_flat_object(services: Vec<ServiceOffering>) {
    let view = DerivedStatsView::compute(&services, &FilterSpec::All);
    let json = serde_json::to_value(&view.stats).expect("stats serialise");

    assert_eq!(json["activeCount"], 2);
    assert_eq!(json["totalCost"], "280.00");
}

#[test]
fn lookups_respect_metric_types() {
    let view = DerivedStatsView::compute(&services(), &FilterSpec::All);
    assert_eq!(view.stats.amount("activeCount"), None);
    assert_eq!(view.stats.count("totalCost"), None);
    assert_eq!(view.stats.get("unknown"), None);
    assert_eq!(view.stats.len(), 4);
}

const LARGEST_AMOUNT: &str = "79228162514264337593543950335";

#[test]
fn oversized_prices_saturate_instead_of_panicking() {
    let parts = vec![part("1", "Engine", 2, LARGEST_AMOUNT, 1)];
    let view = DerivedStatsView::compute(&parts, &FilterSpec::All);

    assert_eq!(view.stats.amount("inventoryValue"), Some(money(LARGEST_AMOUNT)));
    assert_eq!(view.stats.count("totalUnits"), Some(2));
}

#[test]
fn oversized_costs_saturate_when_summed() {
    let services = vec![
        service("1", ServiceStatus::Active, Some(LARGEST_AMOUNT)),
        service("2", ServiceStatus::Active, Some(LARGEST_AMOUNT)),
        service("3", ServiceStatus::Inactive, Some("1")),
    ];
    let view = DerivedStatsView::compute(&services, &FilterSpec::Equals(ServiceStatus::Inactive));

    assert_eq!(view.filtered.len(), 1);
    assert_eq!(view.stats.amount("totalCost"), Some(money(LARGEST_AMOUNT)));
    assert_eq!(view.stats.count("totalCount"), Some(3));
}
