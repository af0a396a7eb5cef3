//! Storage seam for producers. Handlers only see `ProducerStore`; the backend is injected through `AppState`.

mod memory;
mod postgres;

pub use memory::MemoryProducerStore;
pub use postgres::PgProducerStore;

use crate::error::AppError;
use crate::model::{NewProducer, Producer};
use crate::query::ListQuery;
use async_trait::async_trait;

/// Persistence for the producer table. Every write commits atomically or not at all.
#[async_trait]
pub trait ProducerStore: Send + Sync {
    /// Rows matching every filter, in the query's order. Projection is left to the caller.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Producer>, AppError>;

    async fn get(&self, id: i32) -> Result<Option<Producer>, AppError>;

    /// Insert with a storage-assigned id.
    async fn create(&self, body: &NewProducer) -> Result<Producer, AppError>;

    /// Replace the business fields of an existing row. `None` if the id is gone.
    async fn update(&self, id: i32, body: &NewProducer) -> Result<Option<Producer>, AppError>;

    /// `false` if there was no such row.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    /// Insert many rows in one transaction. Returns the number inserted.
    async fn insert_many(&self, items: &[NewProducer]) -> Result<u64, AppError>;

    async fn truncate(&self) -> Result<(), AppError>;

    /// Cheap liveness check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
