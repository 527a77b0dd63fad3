//! Derived dashboard views: filtered subsets plus global aggregate statistics.
//!
//! Statistics are always computed over the full collection, never the
//! filtered subset, and are recomputed on every call; nothing is cached.

use std::collections::BTreeMap;

use money::Money;
use serde::Serialize;

use super::filter::FilterSpec;
use super::record::{Record, RecordId};

/// One aggregate a record kind exposes on its dashboard.
pub enum Metric<R: Record> {
    /// Number of records in the collection.
    CountAll {
        /// Metric name, e.g. `totalCount`.
        name: &'static str,
    },
    /// Number of records whose discriminator equals `value`.
    CountWhere {
        /// Metric name, e.g. `activeCount`.
        name: &'static str,
        /// Discriminator value being counted.
        value: R::Discriminator,
    },
    /// Number of records flagged by [`Aggregate::is_flagged`].
    CountFlagged {
        /// Metric name.
        name: &'static str,
    },
    /// Sum of a whole-number field; absent values count as zero.
    SumQuantity {
        /// Metric name.
        name: &'static str,
        /// Field accessor.
        field: fn(&R) -> Option<u32>,
    },
    /// Sum of a currency field; absent values count as zero.
    SumAmount {
        /// Metric name.
        name: &'static str,
        /// Field accessor.
        field: fn(&R) -> Option<Money>,
    },
}

impl<R: Record> Metric<R> {
    /// Metric name as exposed in [`AggregateStats`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::CountAll { name }
            | Self::CountWhere { name, .. }
            | Self::CountFlagged { name }
            | Self::SumQuantity { name, .. }
            | Self::SumAmount { name, .. } => *name,
        }
    }

    fn zero(&self) -> MetricValue {
        match self {
            Self::SumAmount { .. } => MetricValue::Amount(Money::ZERO),
            _ => MetricValue::Count(0),
        }
    }

    fn accumulate(&self, record: &R, flagged: bool, total: &mut MetricValue) {
        match (self, total) {
            (Self::CountAll { .. }, MetricValue::Count(count)) => {
                *count = count.saturating_add(1);
            }
            (Self::CountWhere { value, .. }, MetricValue::Count(count)) => {
                if record.discriminator() == value {
                    *count = count.saturating_add(1);
                }
            }
            (Self::CountFlagged { .. }, MetricValue::Count(count)) => {
                if flagged {
                    *count = count.saturating_add(1);
                }
            }
            (Self::SumQuantity { field, .. }, MetricValue::Count(count)) => {
                *count = count.saturating_add(u64::from(field(record).unwrap_or(0)));
            }
            (Self::SumAmount { field, .. }, MetricValue::Amount(amount)) => {
                *amount += field(record).unwrap_or(Money::ZERO);
            }
            _ => {}
        }
    }
}

/// Record kinds that declare the statistics shown on their dashboard.
pub trait Aggregate: Record + Sized {
    /// Metrics computed for this record kind, in display order.
    fn metrics() -> Vec<Metric<Self>>;

    /// Per-record flag surfaced next to the statistics (e.g. low stock).
    fn is_flagged(&self) -> bool {
        false
    }
}

/// Value of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A count or whole-number sum.
    Count(u64),
    /// A currency sum, rounded to two fractional digits.
    Amount(Money),
}

/// Named aggregate statistics for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AggregateStats(BTreeMap<&'static str, MetricValue>);

impl AggregateStats {
    /// Look up any metric by name.
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.0.get(name).copied()
    }

    /// Look up a count metric by name.
    pub fn count(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            MetricValue::Count(count) => Some(count),
            MetricValue::Amount(_) => None,
        }
    }

    /// Look up a currency metric by name.
    pub fn amount(&self, name: &str) -> Option<Money> {
        match self.get(name)? {
            MetricValue::Amount(amount) => Some(amount),
            MetricValue::Count(_) => None,
        }
    }

    /// Iterate over metrics in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, MetricValue)> + '_ {
        self.0.iter().map(|(name, value)| (*name, *value))
    }

    /// Number of metrics present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no metrics are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// View model handed to a renderer: the filtered records, global statistics
/// and the identifiers of flagged records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStatsView<R> {
    /// Records passing the filter, in their original order.
    pub filtered: Vec<R>,
    /// Statistics over the unfiltered collection.
    pub stats: AggregateStats,
    /// Identifiers of flagged records, in their original order.
    pub flagged: Vec<RecordId>,
}

impl<R: Aggregate + Clone> DerivedStatsView<R> {
    /// Compute the view for `records` under `filter` in a single pass.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{
    ///     DerivedStatsView, FilterSpec, RecordId, ServiceOffering, ServiceStatus,
    /// };
    ///
    /// let service = |id: &str, status, cost: &str| ServiceOffering {
    ///     id: RecordId::new(id).expect("valid id"),
    ///     title: format!("Service {id}"),
    ///     description: String::new(),
    ///     image: None,
    ///     status,
    ///     cost: Some(cost.parse().expect("valid amount")),
    /// };
    /// let records = vec![
    ///     service("1", ServiceStatus::Active, "150"),
    ///     service("2", ServiceStatus::Inactive, "80"),
    ///     service("3", ServiceStatus::Active, "50"),
    /// ];
    ///
    /// let view = DerivedStatsView::compute(&records, &FilterSpec::Equals(ServiceStatus::Active));
    /// assert_eq!(view.filtered.len(), 2);
    /// assert_eq!(view.stats.count("activeCount"), Some(2));
    /// assert_eq!(view.stats.amount("totalCost").map(|m| m.to_string()).as_deref(), Some("280.00"));
    /// ```
    pub fn compute(records: &[R], filter: &FilterSpec<R::Discriminator>) -> Self {
        let metrics = R::metrics();
        let mut totals: Vec<MetricValue> = metrics.iter().map(Metric::zero).collect();
        let mut filtered = Vec::new();
        let mut flagged = Vec::new();

        for record in records {
            let is_flagged = record.is_flagged();
            if is_flagged {
                flagged.push(record.id().clone());
            }
            for (metric, total) in metrics.iter().zip(totals.iter_mut()) {
                metric.accumulate(record, is_flagged, total);
            }
            if filter.matches(record.discriminator()) {
                filtered.push(record.clone());
            }
        }

        let stats = metrics
            .iter()
            .zip(totals)
            .map(|(metric, total)| {
                let value = match total {
                    MetricValue::Amount(amount) => MetricValue::Amount(amount.rounded()),
                    count @ MetricValue::Count(_) => count,
                };
                (metric.name(), value)
            })
            .collect();

        Self {
            filtered,
            stats: AggregateStats(stats),
            flagged,
        }
    }
}

impl<R> DerivedStatsView<R> {
    /// Whether the record with `id` was flagged.
    pub fn is_flagged(&self, id: &RecordId) -> bool {
        self.flagged.contains(id)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
