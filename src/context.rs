//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::PermissionGate,
    database::{self, Db},
    domain::{
        availability::{AvailabilityService, PgAvailabilityService},
        schedules::{PgSchedulesService, SchedulesService},
        stores::{PgStoresService, StoresService},
        stylists::{PgStylistsService, StylistsService},
        templates::{PgTemplatesService, TemplatesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub schedules: Arc<dyn SchedulesService>,
    pub templates: Arc<dyn TemplatesService>,
    pub availability: Arc<dyn AvailabilityService>,
    pub stores: Arc<dyn StoresService>,
    pub stylists: Arc<dyn StylistsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        gate: PermissionGate,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            schedules: Arc::new(PgSchedulesService::new(db.clone(), gate)),
            templates: Arc::new(PgTemplatesService::new(db.clone())),
            availability: Arc::new(PgAvailabilityService::new(db.clone())),
            stores: Arc::new(PgStoresService::new(db.clone())),
            stylists: Arc::new(PgStylistsService::new(db)),
        })
    }
}
