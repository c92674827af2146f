//! Park persistence: the `ParkStore` seam plus PostgreSQL and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryParkStore;
pub use postgres::{ensure_database_exists, PgParkStore};

use crate::error::AppError;
use crate::model::{Park, ParkFilter, ParkInput};
use async_trait::async_trait;

/// Single-table operations. Each call is one independent statement.
#[async_trait]
pub trait ParkStore: Send + Sync {
    /// Rows matching every present filter, ordered by id.
    async fn list(&self, filter: &ParkFilter) -> Result<Vec<Park>, AppError>;

    async fn get(&self, id: i32) -> Result<Option<Park>, AppError>;

    /// Insert with a store-generated id and version 1.
    async fn insert(&self, input: &ParkInput) -> Result<Park, AppError>;

    async fn current_version(&self, id: i32) -> Result<Option<i64>, AppError>;

    /// Overwrite every data column when the stored version equals `expected_version`.
    /// Returns false when no row matched (absent or stale).
    async fn update(&self, id: i32, input: &ParkInput, expected_version: i64) -> Result<bool, AppError>;

    /// Returns false when no row had this id.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    async fn exists(&self, id: i32) -> Result<bool, AppError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
