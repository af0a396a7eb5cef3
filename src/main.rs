//! Producers API server and data management commands.

use clap::{Parser, Subcommand};
use producers_api::{
    apply_migrations, app, migration::load_samples, AppConfig, AppState, MemoryProducerStore, PgProducerStore,
    ProducerStore, StorageBackend,
};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// REST API for computer producers.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Add sample producers from a JSON file.
    Seed {
        /// Sample file; defaults to SAMPLES_PATH.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Remove every producer.
    Truncate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("producers_api=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let store = open_store(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, store).await?,
        Command::Seed { path } => {
            let path = path.unwrap_or_else(|| config.samples_path.clone());
            let items = load_samples(&path).await?;
            let inserted = store.insert_many(&items).await?;
            tracing::info!(inserted, path = %path.display(), "sample data added");
        }
        Command::Truncate => {
            store.truncate().await?;
            tracing::info!("all producers removed");
        }
    }
    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<Box<dyn ProducerStore>, Box<dyn std::error::Error>> {
    Ok(match config.storage {
        StorageBackend::Postgres => {
            let store = PgProducerStore::connect(config.database_url()?, config.max_connections).await?;
            apply_migrations(store.pool()).await?;
            Box::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Box::new(MemoryProducerStore::new())
        }
    })
}

async fn serve(config: &AppConfig, store: Box<dyn ProducerStore>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState {
        store: store.into(),
    };
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
