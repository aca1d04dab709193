//! In-memory repository used for local development and tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::database::models::Entity;
use crate::database::repository::{Repository, RepositoryError};

struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

/// Thread-safe in-memory repository. Ids come from a counter that only moves
/// forward, so a deleted id is never handed out again.
#[derive(Clone)]
pub struct MemoryRepository<T> {
    inner: Arc<Mutex<Table<T>>>,
}

impl<T: Entity> MemoryRepository<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock().map(|table| table.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table<T>>, RepositoryError> {
        self.inner.lock().map_err(|_| RepositoryError::Lock)
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<T, RepositoryError> {
        self.lock()?
            .rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(T::LABEL))
    }

    async fn create(&self, entity: &mut T) -> Result<(), RepositoryError> {
        let mut table = self.lock()?;
        let id = table.next_id;
        table.next_id += 1;
        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &T) -> Result<(), RepositoryError> {
        let mut table = self.lock()?;
        match table.rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(T::LABEL)),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        self.lock()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(T::LABEL))
    }
}
