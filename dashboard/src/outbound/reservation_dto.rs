//! Wire shape of a reservation, shared by the REST and document-store
//! adapters.
//!
//! Both sources decode into [`ReservationDto`] first and map into the domain
//! [`Reservation`] in one place, so status normalisation and date parsing
//! behave identically whichever path served the data.

use chrono::{DateTime, NaiveDate};
use money::Money;
use serde::Deserialize;

use crate::domain::{RecordId, Reservation, ReservationStatus};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum IdDto {
    Text(String),
    Number(i64),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReservationDto {
    #[serde(default, alias = "_id")]
    pub(super) id: Option<IdDto>,
    #[serde(default, alias = "customerName")]
    pub(super) customer: Option<String>,
    #[serde(default, alias = "serviceName", alias = "serviceType")]
    pub(super) service: Option<String>,
    #[serde(default)]
    pub(super) service_date: Option<String>,
    #[serde(default)]
    pub(super) status: Option<String>,
    #[serde(default, alias = "phone", alias = "customerPhone")]
    pub(super) contact: Option<String>,
    #[serde(default, alias = "price", alias = "totalPrice")]
    pub(super) cost: Option<Money>,
    #[serde(default)]
    pub(super) service_center_id: Option<String>,
}

impl ReservationDto {
    /// Map into a domain reservation.
    ///
    /// `fallback_id` is used when the payload carries no identifier of its
    /// own. A missing status means the booking has not been acted on yet.
    pub(super) fn into_domain(self, fallback_id: Option<&str>) -> Result<Reservation, String> {
        let raw_id = match self.id {
            Some(IdDto::Text(text)) => text,
            Some(IdDto::Number(number)) => number.to_string(),
            None => fallback_id.unwrap_or_default().to_owned(),
        };
        let id = RecordId::new(raw_id).map_err(|err| format!("reservation id: {err}"))?;
        let status = match self.status.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw
                .parse::<ReservationStatus>()
                .map_err(|err| format!("reservation {id}: {err}"))?,
            _ => ReservationStatus::Pending,
        };

        Ok(Reservation {
            service_date: self.service_date.as_deref().and_then(parse_service_date),
            customer: self.customer.unwrap_or_default(),
            service: self.service.unwrap_or_default(),
            status,
            contact: self.contact.unwrap_or_default(),
            cost: self.cost,
            service_center_id: self.service_center_id,
            id,
        })
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn decode(json: &str) -> ReservationDto {
        serde_json::from_str(json).expect("reservation JSON should decode")
    }

    #[test]
    fn maps_api_payloads_into_reservations() {
        let dto = decode(
            r#"{
                "_id": "665f1c",
                "customerName": "John Doe",
                "serviceName": "Oil Change",
                "serviceDate": "2024-05-20",
                "status": " CONFIRMED ",
                "phone": "555-1234",
                "price": 49.99,
                "serviceCenterId": "center-9"
            }"#,
        );

        let reservation = dto.into_domain(None).expect("valid reservation");

        assert_eq!(reservation.id.as_str(), "665f1c");
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.formatted_date(), "2024-05-20");
        assert_eq!(reservation.cost.map(|cost| cost.to_string()).as_deref(), Some("49.99"));
        assert_eq!(reservation.service_center_id.as_deref(), Some("center-9"));
    }

    #[test]
    fn fallback_id_applies_only_when_payload_has_none() {
        let with_own = decode(r#"{"id": 7, "status": "pending"}"#);
        let without = decode(r#"{"status": "pending"}"#);

        assert_eq!(
            with_own.into_domain(Some("doc-1")).expect("valid").id.as_str(),
            "7"
        );
        assert_eq!(
            without.into_domain(Some("doc-1")).expect("valid").id.as_str(),
            "doc-1"
        );
    }

    #[test]
    fn missing_identifiers_are_rejected() {
        let error = decode(r#"{"status": "pending"}"#)
            .into_domain(None)
            .expect_err("no id anywhere");
        assert!(error.contains("reservation id"));
    }

    #[test]
    fn unknown_statuses_are_rejected() {
        let error = decode(r#"{"id": "r-1", "status": "teleported"}"#)
            .into_domain(None)
            .expect_err("unknown status");
        assert!(error.contains("teleported"));
    }

    #[test]
    fn missing_status_defaults_to_pending() {
        let reservation = decode(r#"{"id": "r-1"}"#)
            .into_domain(None)
            .expect("valid reservation");
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.formatted_date(), "No date");
    }

    #[rstest]
    #[case("2024-05-20", Some((2024, 5, 20)))]
    #[case("2024-05-20T09:30:00Z", Some((2024, 5, 20)))]
    #[case("2024-05-20T23:30:00-02:00", Some((2024, 5, 20)))]
    #[case("next tuesday", None)]
    #[case("", None)]
    fn service_dates_parse_leniently(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected =
            expected.and_then(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day));
        assert_eq!(parse_service_date(raw), expected);
    }
}
