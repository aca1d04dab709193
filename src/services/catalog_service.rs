use std::sync::Arc;

use async_trait::async_trait;

use crate::database::models::Entity;
use crate::database::repository::{Repository, RepositoryError};

/// Shared handle the HTTP layer holds for one entity type
pub type DynService<T> = Arc<dyn CatalogService<T>>;

/// Business operations for one catalog entity.
///
/// The contract mirrors [`Repository`] one to one. Rules that span requests
/// (defaults, cross-entity checks, caching) belong here rather than in handlers.
#[async_trait]
pub trait CatalogService<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    async fn get_by_id(&self, id: i32) -> Result<T, RepositoryError>;

    async fn create(&self, entity: &mut T) -> Result<(), RepositoryError>;

    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct EntityService<T> {
    repo: Arc<dyn Repository<T>>,
}

impl<T: Entity> EntityService<T> {
    pub fn new(repo: Arc<dyn Repository<T>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<T: Entity> CatalogService<T> for EntityService<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        self.repo.get_all().await
    }

    async fn get_by_id(&self, id: i32) -> Result<T, RepositoryError> {
        self.repo.get_by_id(id).await
    }

    async fn create(&self, entity: &mut T) -> Result<(), RepositoryError> {
        self.repo.create(entity).await
    }

    async fn update(&self, entity: &T) -> Result<(), RepositoryError> {
        self.repo.update(entity).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        self.repo.delete(id).await
    }
}
