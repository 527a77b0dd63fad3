//! Driven port for collections an operator edits from the dashboard.
//!
//! Dashboards read and write through this port instead of holding the
//! collection themselves, so the filter and statistics logic never depends on
//! where records live.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Record, RecordId};

define_port_error! {
    /// Errors surfaced by a record repository.
    pub enum RepositoryError {
        /// No record exists with the identifier.
        NotFound { id: String } [NotFound] =>
            "record {id} not found",
        /// A record with the identifier already exists.
        Conflict { id: String } [Server] =>
            "record {id} already exists",
        /// The backing store failed.
        Backend { message: String } [Network] =>
            "record store failed: {message}",
    }
}

/// Port for listing and editing one record collection.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Record + Send + Sync + 'static,
{
    /// Return every record in insertion order.
    async fn list(&self) -> Result<Vec<T>, RepositoryError>;

    /// Insert a new record.
    async fn add(&self, record: T) -> Result<T, RepositoryError>;

    /// Replace the record sharing `record`'s identifier.
    async fn update(&self, record: T) -> Result<T, RepositoryError>;

    /// Delete the record with `id`.
    async fn remove(&self, id: &RecordId) -> Result<(), RepositoryError>;
}
