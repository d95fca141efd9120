//! Stylists service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stylists::{
        errors::StylistsServiceError,
        records::{NewStylist, StylistId, StylistRecord},
        repository::PgStylistsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStylistsService {
    db: Db,
    repository: PgStylistsRepository,
}

impl PgStylistsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStylistsRepository::new(),
        }
    }
}

#[async_trait]
impl StylistsService for PgStylistsService {
    async fn create_stylist(
        &self,
        stylist: NewStylist,
    ) -> Result<StylistRecord, StylistsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_stylist(&mut tx, stylist).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_stylist(&self, stylist: StylistId) -> Result<StylistRecord, StylistsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .get_stylist(&mut tx, stylist)
            .await?
            .ok_or(StylistsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(found)
    }
}

#[automock]
#[async_trait]
pub trait StylistsService: Send + Sync {
    /// Creates a new stylist linked to a staff account.
    async fn create_stylist(
        &self,
        stylist: NewStylist,
    ) -> Result<StylistRecord, StylistsServiceError>;

    /// Retrieve a single stylist.
    async fn get_stylist(&self, stylist: StylistId)
    -> Result<StylistRecord, StylistsServiceError>;
}
