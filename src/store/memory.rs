//! In-process backend with the same list semantics as the SQL one. Used by tests and `STORAGE=memory`.

use super::ProducerStore;
use crate::error::AppError;
use crate::model::{NewProducer, Producer};
use crate::query::ListQuery;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Producer>,
    /// Last id handed out; ids are never reused, even after truncate.
    last_id: i32,
}

impl Table {
    fn insert(&mut self, body: &NewProducer) -> Producer {
        self.last_id += 1;
        let row = body.clone().with_id(self.last_id);
        self.rows.insert(row.id, row.clone());
        row
    }
}

#[derive(Default)]
pub struct MemoryProducerStore {
    table: RwLock<Table>,
}

impl MemoryProducerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProducerStore for MemoryProducerStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Producer>, AppError> {
        let table = self.table.read().await;
        let mut rows: Vec<Producer> = table
            .rows
            .values()
            .filter(|p| query.filters.iter().all(|f| f.matches(p)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| query.compare(a, b));
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Producer>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, body: &NewProducer) -> Result<Producer, AppError> {
        Ok(self.table.write().await.insert(body))
    }

    async fn update(&self, id: i32, body: &NewProducer) -> Result<Option<Producer>, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = body.clone().with_id(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn insert_many(&self, items: &[NewProducer]) -> Result<u64, AppError> {
        let mut table = self.table.write().await;
        for body in items {
            table.insert(body);
        }
        Ok(items.len() as u64)
    }

    async fn truncate(&self) -> Result<(), AppError> {
        self.table.write().await.rows.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
