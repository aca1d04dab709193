use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::database::models::Entity;

/// Errors surfaced by every repository implementation
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row carries the requested id. Holds the entity label.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error("in-memory store lock poisoned")]
    Lock,
}

/// CRUD capability over one entity table.
///
/// Services hold an `Arc<dyn Repository<T>>`, so the backing store is chosen when
/// the application is wired and can be swapped without touching callers.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Every row, ordered by id
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    async fn get_by_id(&self, id: i32) -> Result<T, RepositoryError>;

    /// Insert the entity and write the store-generated id back into it
    async fn create(&self, entity: &mut T) -> Result<(), RepositoryError>;

    /// Overwrite name and description of the row with `entity.id()`
    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

/// PostgreSQL-backed repository. All values travel as bound parameters; only the
/// compile-time table name is interpolated.
pub struct PgRepository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Entity> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    fn select_sql(filter: &str) -> String {
        format!(
            "SELECT id, name, COALESCE(description, '') AS description FROM {} {}",
            T::TABLE,
            filter
        )
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        let rows = sqlx::query_as::<_, T>(&Self::select_sql("ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        debug!("Loaded {} rows from {}", rows.len(), T::TABLE);
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<T, RepositoryError> {
        sqlx::query_as::<_, T>(&Self::select_sql("WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(T::LABEL))
    }

    async fn create(&self, entity: &mut T) -> Result<(), RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (name, description) VALUES ($1, $2) RETURNING id",
            T::TABLE
        );
        let id: i32 = sqlx::query_scalar(&sql)
            .bind(entity.name())
            .bind(entity.description())
            .fetch_one(&self.pool)
            .await?;
        entity.set_id(id);
        debug!("Inserted {} row {}", T::TABLE, id);
        Ok(())
    }

    async fn update(&self, entity: &T) -> Result<(), RepositoryError> {
        let sql = format!(
            "UPDATE {} SET name = $1, description = $2 WHERE id = $3",
            T::TABLE
        );
        let result = sqlx::query(&sql)
            .bind(entity.name())
            .bind(entity.description())
            .bind(entity.id())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(T::LABEL));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(T::LABEL));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Category, Product};

    #[test]
    fn select_sql_targets_entity_table() {
        assert_eq!(
            PgRepository::<Category>::select_sql("WHERE id = $1"),
            "SELECT id, name, COALESCE(description, '') AS description FROM categories WHERE id = $1"
        );
        assert!(PgRepository::<Product>::select_sql("ORDER BY id").contains("FROM products ORDER BY id"));
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(RepositoryError::NotFound("Category").to_string(), "Category not found");
    }

    /// Runs against a real database only when TEST_DATABASE_URL is set. The
    /// `categories` table must already exist (see schema.sql).
    #[tokio::test]
    async fn postgres_round_trip() {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return;
        };
        let options = crate::database::DatabaseManager::connect_options(&url).unwrap();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await
            .unwrap();
        let repo = PgRepository::<Category>::new(pool);

        let mut category = Category::from_fields(0, "Round trip".into(), "pg".into());
        repo.create(&mut category).await.unwrap();
        assert!(category.id > 0);
        assert_eq!(repo.get_by_id(category.id).await.unwrap(), category);

        category.name = "Round trip 2".into();
        repo.update(&category).await.unwrap();
        assert_eq!(repo.get_by_id(category.id).await.unwrap().name, "Round trip 2");

        repo.delete(category.id).await.unwrap();
        assert!(matches!(
            repo.get_by_id(category.id).await,
            Err(RepositoryError::NotFound("Category"))
        ));
        assert!(matches!(
            repo.delete(category.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
