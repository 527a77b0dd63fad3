//! In-process adapters for tests and local runs.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{Identity, IdentityProvider, Repository, RepositoryError};
use crate::domain::{Record, RecordId};

/// Repository holding records in insertion order behind a mutex.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: Mutex<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<T> InMemoryRepository<T> {
    /// Seed the repository with `records`.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<T>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::backend("in-memory record store lock poisoned"))
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Record + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn add(&self, record: T) -> Result<T, RepositoryError> {
        let mut records = self.lock()?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(RepositoryError::conflict(record.id().as_str()));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, RepositoryError> {
        let mut records = self.lock()?;
        let slot = records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
            .ok_or_else(|| RepositoryError::not_found(record.id().as_str()))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn remove(&self, id: &RecordId) -> Result<(), RepositoryError> {
        let mut records = self.lock()?;
        let position = records
            .iter()
            .position(|existing| existing.id() == id)
            .ok_or_else(|| RepositoryError::not_found(id.as_str()))?;
        records.remove(position);
        Ok(())
    }
}

/// Identity provider returning a fixed identity, or none.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    /// Always report `identity` as signed in.
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Never report an identity.
    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
