//! Wiring of repositories and services for the selected storage backend.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::database::{
    Category, DatabaseError, DatabaseManager, Entity, MemoryRepository, PgRepository, Product,
    Repository,
};
use crate::services::{DynService, EntityService};

/// Services handed to the router, one per entity.
#[derive(Clone)]
pub struct AppState {
    pub categories: DynService<Category>,
    pub products: DynService<Product>,
    /// Present only for the PostgreSQL backend; used by the health check and shutdown
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Connect according to `config.server.storage`. A PostgreSQL backend that
    /// cannot be reached is an error.
    pub async fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        match config.server.storage {
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                Ok(Self::postgres(pool))
            }
            StorageBackend::Memory => Ok(Self::in_memory()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        info!("Using PostgreSQL storage");
        Self {
            categories: service::<Category>(Arc::new(PgRepository::<Category>::new(pool.clone()))),
            products: service::<Product>(Arc::new(PgRepository::<Product>::new(pool.clone()))),
            pool: Some(pool),
        }
    }

    pub fn in_memory() -> Self {
        info!("Using in-memory storage; data is lost on restart");
        Self {
            categories: service::<Category>(Arc::new(MemoryRepository::<Category>::new())),
            products: service::<Product>(Arc::new(MemoryRepository::<Product>::new())),
            pool: None,
        }
    }
}

fn service<T: Entity>(repo: Arc<dyn Repository<T>>) -> DynService<T> {
    Arc::new(EntityService::new(repo))
}
