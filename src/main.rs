//! Document access-control server.
//!
//! Grants and checks per-user, per-document permissions (READ/WRITE/DELETE)
//! with a single super-identity (`admin`) that bypasses all checks.
//!
//! # Configuration
//!
//! Environment variables:
//! - `DOCACCESS_PORT`: Port to listen on (default: 8080)
//! - `DOCACCESS_DATABASE_PATH`: Path to the SQLite database
//!   (default: `<data dir>/docaccess/docaccess.db`)

mod access;
mod config;
mod db;
mod models;
mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use access::{DocumentService, DocumentStore, GrantService, GrantStore, PermissionEngine};
use config::Config;
use db::{init_db, SqliteDocumentStore, SqliteGrantStore};
use server::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docaccess=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Database: {}", config.database_path.display());

    let pool = match init_db(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let documents: Arc<dyn DocumentStore> = Arc::new(SqliteDocumentStore::new(pool.clone()));
    let grants: Arc<dyn GrantStore> = Arc::new(SqliteGrantStore::new(pool));
    let engine = PermissionEngine::new(grants.clone());

    let state = AppState {
        documents: DocumentService::new(documents.clone(), grants.clone(), engine.clone()),
        grants: GrantService::new(documents, grants, engine),
    };

    let app = server::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
