//! Stores service.
//!
//! Stores are maintained by an out-of-scope back-office flow; this
//! service only carries what the engine, the CLI, and the tests need:
//! creation and lookup.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stores::{
        errors::StoresServiceError,
        records::{NewStore, StoreId, StoreRecord},
        repository::PgStoresRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStoresService {
    db: Db,
    repository: PgStoresRepository,
}

impl PgStoresService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStoresRepository::new(),
        }
    }
}

#[async_trait]
impl StoresService for PgStoresService {
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_store(&self, store: StoreId) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .get_store(&mut tx, store)
            .await?
            .ok_or(StoresServiceError::NotFound)?;

        tx.commit().await?;

        Ok(found)
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Creates a new store.
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError>;

    /// Retrieve a single store.
    async fn get_store(&self, store: StoreId) -> Result<StoreRecord, StoresServiceError>;
}
