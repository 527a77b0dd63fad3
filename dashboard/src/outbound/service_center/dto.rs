//! DTOs for decoding service-center API responses.

use serde::{Deserialize, Serialize};

use crate::outbound::reservation_dto::ReservationDto;
use crate::domain::ReservationStatus;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ReservationListDto {
    Wrapped {
        #[serde(alias = "data")]
        reservations: Vec<ReservationDto>,
    },
    Bare(Vec<ReservationDto>),
}

impl ReservationListDto {
    pub(super) fn into_items(self) -> Vec<ReservationDto> {
        match self {
            Self::Wrapped { reservations } | Self::Bare(reservations) => reservations,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ReservationEnvelopeDto {
    Wrapped {
        #[serde(alias = "data")]
        reservation: ReservationDto,
    },
    Bare(ReservationDto),
}

impl ReservationEnvelopeDto {
    pub(super) fn into_item(self) -> ReservationDto {
        match self {
            Self::Wrapped { reservation } | Self::Bare(reservation) => reservation,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StatusUpdateDto {
    pub(super) status: ReservationStatus,
}
