//! Operator dashboards over editable record collections.
//!
//! The service catalogue and the spare-parts inventory share one board: list,
//! add, edit and remove through a [`Repository`], and derive the filtered view
//! with global statistics on demand.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use super::catalogue::ServiceOffering;
use super::error::Error;
use super::filter::FilterSpec;
use super::inventory::SparePart;
use super::ports::{Repository, RepositoryError};
use super::record::{Drafted, Record, RecordId, RecordValidationError};
use super::stats::{Aggregate, DerivedStatsView};
use super::DomainResult;

fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::NotFound { id } => Error::not_found(format!("record {id} not found")),
        RepositoryError::Conflict { id } => {
            Error::invalid_request(format!("record {id} already exists"))
        }
        RepositoryError::Backend { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
    }
}

fn map_validation_error(error: RecordValidationError) -> Error {
    Error::invalid_request(format!("invalid record: {error}"))
}

/// Dashboard service for one editable collection.
pub struct CatalogueBoard<T, R: ?Sized> {
    repository: Arc<R>,
    record: PhantomData<fn() -> T>,
}

/// Board for the service catalogue.
pub type ServiceBoard<R> = CatalogueBoard<ServiceOffering, R>;

/// Board for the spare-parts inventory.
pub type InventoryBoard<R> = CatalogueBoard<SparePart, R>;

impl<T, R: ?Sized> Clone for CatalogueBoard<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            record: PhantomData,
        }
    }
}

impl<T, R> CatalogueBoard<T, R>
where
    T: Drafted + Aggregate + Clone + Send + Sync + 'static,
    R: Repository<T> + ?Sized,
{
    /// Create a board over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            record: PhantomData,
        }
    }

    /// Every record, in repository order.
    pub async fn list(&self) -> DomainResult<Vec<T>> {
        self.repository.list().await.map_err(map_repository_error)
    }

    /// Create a record from an operator's draft under a fresh identifier.
    pub async fn add(&self, draft: T::Draft) -> DomainResult<T> {
        let record = T::from_draft(RecordId::generate(), draft).map_err(map_validation_error)?;
        debug!(id = %record.id(), "adding record");
        self.repository
            .add(record)
            .await
            .map_err(map_repository_error)
    }

    /// Replace an existing record after validating it.
    pub async fn update(&self, record: T) -> DomainResult<T> {
        record.validate().map_err(map_validation_error)?;
        debug!(id = %record.id(), "updating record");
        self.repository
            .update(record)
            .await
            .map_err(map_repository_error)
    }

    /// Delete the record with `id`.
    pub async fn remove(&self, id: &RecordId) -> DomainResult<()> {
        debug!(%id, "removing record");
        self.repository
            .remove(id)
            .await
            .map_err(map_repository_error)
    }

    /// Load the collection and derive the dashboard view.
    pub async fn view(
        &self,
        filter: &FilterSpec<T::Discriminator>,
    ) -> DomainResult<DerivedStatsView<T>> {
        let records = self.list().await?;
        Ok(DerivedStatsView::compute(&records, filter))
    }
}

#[cfg(test)]
#[path = "catalogue_board_tests.rs"]
mod tests;
