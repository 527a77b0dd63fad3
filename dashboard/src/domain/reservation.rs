//! Customer service reservations received by a service center.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use money::Money;
use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId, RecordValidationError};
use super::stats::{Aggregate, Metric};

/// Lifecycle status of a reservation.
///
/// Sources disagree on casing ("pending" vs "Pending"); parsing accepts any
/// casing and the canonical label is the capitalised form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ReservationStatus {
    /// Awaiting confirmation by the center.
    Pending,
    /// Accepted by the center.
    Confirmed,
    /// Work finished.
    Completed,
    /// Withdrawn by either party.
    Cancelled,
}

impl ReservationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Canonical label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = RecordValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let candidate = if trimmed.eq_ignore_ascii_case("canceled") {
            "Cancelled"
        } else {
            trimmed
        };
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(candidate))
            .ok_or_else(|| RecordValidationError::UnknownStatus {
                kind: "reservation",
                value: raw.to_owned(),
            })
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A booked service appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Record identifier.
    pub id: RecordId,
    /// Customer display name.
    pub customer: String,
    /// Name of the booked service.
    pub service: String,
    /// Day the service is booked for, when known.
    #[serde(default)]
    pub service_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Customer contact details.
    #[serde(default)]
    pub contact: String,
    /// Quoted price, when known.
    #[serde(default)]
    pub cost: Option<Money>,
    /// Owning service center.
    #[serde(default)]
    pub service_center_id: Option<String>,
}

impl Reservation {
    /// Service date rendered for display, or `No date` when unknown.
    pub fn formatted_date(&self) -> String {
        self.service_date.map_or_else(
            || "No date".to_owned(),
            |date| date.format("%Y-%m-%d").to_string(),
        )
    }
}

impl Record for Reservation {
    type Discriminator = ReservationStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn discriminator(&self) -> &ReservationStatus {
        &self.status
    }
}

impl Aggregate for Reservation {
    fn metrics() -> Vec<Metric<Self>> {
        vec![
            Metric::CountWhere {
                name: "pendingCount",
                value: ReservationStatus::Pending,
            },
            Metric::CountWhere {
                name: "confirmedCount",
                value: ReservationStatus::Confirmed,
            },
            Metric::CountWhere {
                name: "completedCount",
                value: ReservationStatus::Completed,
            },
            Metric::CountWhere {
                name: "cancelledCount",
                value: ReservationStatus::Cancelled,
            },
            Metric::SumAmount {
                name: "totalValue",
                field: |reservation| reservation.cost,
            },
        ]
    }
}
