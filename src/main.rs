use clap::Parser;
use dispensary::application::engine::PharmacyEngine;
use dispensary::domain::ports::CatalogStoreBox;
use dispensary::infrastructure::in_memory::InMemoryCatalog;
#[cfg(feature = "storage-rocksdb")]
use dispensary::infrastructure::rocksdb::RocksDbCatalog;
use dispensary::interfaces::http;
use miette::{IntoDiagnostic, Result};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0:3000")]
    listen: SocketAddr,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // A storage failure here terminates the process with a diagnostic.
    let store = open_store(&cli)?;
    let engine = Arc::new(PharmacyEngine::new(store));

    let app = http::router(engine);
    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .into_diagnostic()?;
    tracing::info!(addr = %cli.listen, "listening");
    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(cli: &Cli) -> Result<CatalogStoreBox> {
    match &cli.db_path {
        Some(db_path) => {
            let store = RocksDbCatalog::open(db_path).into_diagnostic()?;
            tracing::info!(path = %db_path.display(), "using RocksDB catalog");
            Ok(Box::new(store))
        }
        None => Ok(Box::new(InMemoryCatalog::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(_cli: &Cli) -> Result<CatalogStoreBox> {
    Ok(Box::new(InMemoryCatalog::new()))
}
