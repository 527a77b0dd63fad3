//! Headline figures for the service-center home screen.

use money::Money;
use serde::Serialize;

use super::stats::AggregateStats;

/// Overview combining service-catalogue and reservation statistics.
///
/// # Examples
/// ```
/// use dashboard::domain::{
///     DerivedStatsView, FilterSpec, HomeSummary, RecordId, Reservation, ServiceOffering,
///     ServiceStatus,
/// };
///
/// let services = vec![ServiceOffering {
///     id: RecordId::new("svc-1").expect("valid id"),
///     title: "Oil Change".to_owned(),
///     description: String::new(),
///     image: None,
///     status: ServiceStatus::Active,
///     cost: Some("49.99".parse().expect("valid amount")),
/// }];
/// let services = DerivedStatsView::compute(&services, &FilterSpec::All);
/// let bookings = DerivedStatsView::<Reservation>::compute(&[], &FilterSpec::All);
///
/// let summary = HomeSummary::from_stats(&services.stats, &bookings.stats);
/// assert_eq!(summary.total_services, 1);
/// assert_eq!(summary.active_services, 1);
/// assert_eq!(summary.total_revenue.to_string(), "49.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSummary {
    /// Offerings in the catalogue, whatever their status.
    pub total_services: u64,
    /// Offerings currently bookable.
    pub active_services: u64,
    /// Reservations awaiting confirmation.
    pub pending_bookings: u64,
    /// Listed value of the whole catalogue.
    pub total_revenue: Money,
}

impl HomeSummary {
    /// Read the headline figures out of the two collections' statistics.
    pub fn from_stats(services: &AggregateStats, reservations: &AggregateStats) -> Self {
        Self {
            total_services: services.count("totalCount").unwrap_or(0),
            active_services: services.count("activeCount").unwrap_or(0),
            pending_bookings: reservations.count("pendingCount").unwrap_or(0),
            total_revenue: services.amount("totalCost").unwrap_or(Money::ZERO),
        }
    }
}
