//! PostgreSQL backend. Writes run in a transaction; an early `?` drops it, which rolls back.

use super::ProducerStore;
use crate::error::AppError;
use crate::model::{NewProducer, Producer};
use crate::query::ListQuery;
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

#[derive(Clone)]
pub struct PgProducerStore {
    pool: PgPool,
}

impl PgProducerStore {
    pub fn new(pool: PgPool) -> Self {
        PgProducerStore { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Prepare a typed query with every parameter of `q` bound in order.
fn producer_query(q: &QueryBuf) -> QueryAs<'_, Postgres, Producer, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, Producer>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}

#[async_trait]
impl ProducerStore for PgProducerStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Producer>, AppError> {
        let q = sql::select_list(query);
        Ok(producer_query(&q).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Producer>, AppError> {
        let q = sql::select_by_id(id);
        Ok(producer_query(&q).fetch_optional(&self.pool).await?)
    }

    async fn create(&self, body: &NewProducer) -> Result<Producer, AppError> {
        let q = sql::insert(body);
        let mut tx = self.pool.begin().await?;
        let row = producer_query(&q).fetch_one(&mut *tx).await?;
        tx.commit().await?;
        tracing::info!(id = row.id, "producer created");
        Ok(row)
    }

    async fn update(&self, id: i32, body: &NewProducer) -> Result<Option<Producer>, AppError> {
        let q = sql::update(id, body);
        let mut tx = self.pool.begin().await?;
        let row = producer_query(&q).fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let q = sql::delete(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut tx = self.pool.begin().await?;
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let result = query.execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_many(&self, items: &[NewProducer]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for body in items {
            let q = sql::insert(body);
            producer_query(&q).fetch_one(&mut *tx).await?;
            inserted += 1;
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn truncate(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(&sql::truncate()).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
