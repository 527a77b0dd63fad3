//! Domain primitives, derived views and driving services.
//!
//! Purpose: Define the typed records shown on the service-center dashboards,
//! the pure filter/statistics derivation over them, and the orchestration
//! that loads reservations from the REST API with a document-store fallback.
//!
//! Public surface:
//! - Records: [`ServiceOffering`], [`SparePart`], [`Reservation`] and their
//!   status or category discriminators.
//! - [`DerivedStatsView`]: filtered subset plus global statistics.
//! - [`FetchWithFallback`]: primary/fallback loading with typed errors.
//! - [`ReservationFeed`], [`CatalogueBoard`], [`HomeSummary`]: services
//!   consumed by the presentation layer.

pub mod catalogue;
pub mod catalogue_board;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod inventory;
pub mod ports;
pub mod record;
pub mod reservation;
pub mod reservation_feed;
pub mod stats;
pub mod summary;

pub use self::catalogue::{ServiceDraft, ServiceOffering, ServiceStatus};
pub use self::catalogue_board::{CatalogueBoard, InventoryBoard, ServiceBoard};
pub use self::error::{Error, ErrorCode};
pub use self::fetch::{
    Classify, FetchError, FetchErrorKind, FetchResult, FetchWithFallback, NOT_AUTHENTICATED,
    load_with_fallback,
};
pub use self::filter::{FilterSpec, NO_FILTER_LABELS};
pub use self::inventory::{PartCategory, SparePart, SparePartDraft};
pub use self::record::{Drafted, Record, RecordId, RecordValidationError};
pub use self::reservation::{Reservation, ReservationStatus};
pub use self::reservation_feed::{BACKEND_UNAVAILABLE, ReservationFeed, ReservationFeedPorts};
pub use self::stats::{Aggregate, AggregateStats, DerivedStatsView, Metric, MetricValue};
pub use self::summary::HomeSummary;

/// Result alias for the operator-facing services.
pub type DomainResult<T> = Result<T, Error>;
