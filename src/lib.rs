//! Producers API: REST CRUD over the producers table with query-string projection, sorting and filtering.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, StorageBackend};
pub use error::{AppError, ConfigError, FieldErrors};
pub use migration::apply_migrations;
pub use model::{Column, NewProducer, Producer};
pub use query::ListQuery;
pub use routes::app;
pub use service::ProducerValidator;
pub use state::AppState;
pub use store::{MemoryProducerStore, PgProducerStore, ProducerStore};
