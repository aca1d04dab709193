pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRepository;
pub use models::{Category, Entity, Product};
pub use repository::{PgRepository, Repository, RepositoryError};
