//! Service offerings listed on the service-center dashboard.

use std::fmt;
use std::str::FromStr;

use money::Money;
use serde::{Deserialize, Serialize};

use super::record::{
    Drafted, Record, RecordId, RecordValidationError, require_non_negative, require_text,
};
use super::stats::{Aggregate, Metric};

/// Availability of a service offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ServiceStatus {
    /// Bookable by customers.
    Active,
    /// Hidden from customers.
    Inactive,
}

impl ServiceStatus {
    /// Canonical label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = RecordValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        [Self::Active, Self::Inactive]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RecordValidationError::UnknownStatus {
                kind: "service",
                value: raw.to_owned(),
            })
    }
}

impl TryFrom<String> for ServiceStatus {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A service a center offers, such as an oil change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    /// Record identifier.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Availability.
    pub status: ServiceStatus,
    /// Listed price.
    #[serde(default)]
    pub cost: Option<Money>,
}

/// Input captured when an operator adds a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDraft {
    /// Display title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Optional image URL.
    pub image: Option<String>,
    /// Availability.
    pub status: ServiceStatus,
    /// Listed price.
    pub cost: Option<Money>,
}

impl Record for ServiceOffering {
    type Discriminator = ServiceStatus;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn discriminator(&self) -> &ServiceStatus {
        &self.status
    }
}

impl Drafted for ServiceOffering {
    type Draft = ServiceDraft;

    fn from_draft(id: RecordId, draft: ServiceDraft) -> Result<Self, RecordValidationError> {
        let offering = Self {
            id,
            title: draft.title.trim().to_owned(),
            description: draft.description,
            image: draft.image.filter(|image| !image.trim().is_empty()),
            status: draft.status,
            cost: draft.cost,
        };
        offering.validate()?;
        Ok(offering)
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("title", &self.title)?;
        require_non_negative("cost", self.cost)
    }
}

impl Aggregate for ServiceOffering {
    fn metrics() -> Vec<Metric<Self>> {
        vec![
            Metric::CountAll { name: "totalCount" },
            Metric::CountWhere {
                name: "activeCount",
                value: ServiceStatus::Active,
            },
            Metric::CountWhere {
                name: "inactiveCount",
                value: ServiceStatus::Inactive,
            },
            Metric::SumAmount {
                name: "totalCost",
                field: |offering| offering.cost,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Active", ServiceStatus::Active)]
    #[case("active", ServiceStatus::Active)]
    #[case(" INACTIVE ", ServiceStatus::Inactive)]
    fn statuses_normalise_case(#[case] raw: &str, #[case] expected: ServiceStatus) {
        assert_eq!(raw.parse::<ServiceStatus>(), Ok(expected));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let error = "Retired".parse::<ServiceStatus>().expect_err("unknown status");
        assert!(matches!(error, RecordValidationError::UnknownStatus { .. }));
    }

    #[test]
    fn statuses_serialise_canonically() {
        let status: ServiceStatus = serde_json::from_str("\"inactive\"").expect("decodes");
        assert_eq!(
            serde_json::to_string(&status).expect("encodes"),
            "\"Inactive\""
        );
    }

    #[test]
    fn drafts_are_trimmed_and_validated() {
        let draft = ServiceDraft {
            title: "  Wheel Alignment ".to_owned(),
            description: "Four-wheel alignment".to_owned(),
            image: Some("   ".to_owned()),
            status: ServiceStatus::Active,
            cost: Some(Money::from_minor(9_000)),
        };
        let offering =
            ServiceOffering::from_draft(RecordId::generate(), draft).expect("valid draft");
        assert_eq!(offering.title, "Wheel Alignment");
        assert_eq!(offering.image, None);
    }

    #[rstest]
    #[case("", Some(Money::from_minor(100)), RecordValidationError::BlankField { field: "title" })]
    #[case("Tune-up", Some(Money::from_minor(-1)), RecordValidationError::NegativeAmount { field: "cost" })]
    fn invalid_drafts_are_rejected(
        #[case] title: &str,
        #[case] cost: Option<Money>,
        #[case] expected: RecordValidationError,
    ) {
        let draft = ServiceDraft {
            title: title.to_owned(),
            description: String::new(),
            image: None,
            status: ServiceStatus::Active,
            cost,
        };
        let error = ServiceOffering::from_draft(RecordId::generate(), draft)
            .expect_err("draft should be rejected");
        assert_eq!(error, expected);
    }
}
