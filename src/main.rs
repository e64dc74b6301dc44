use anyhow::Result;
use axum::Router;
use std::{fs, io::ErrorKind, path::Path, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use config::ConnectionMode;
use db::Database;
use services::movie_service::MovieService;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config + migrate flag ---
    let (cfg, migrate) = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting movie-store with config: {:?}", cfg);

    // --- Probe the SQLite path before any connect attempt runs ---
    prepare_database_path(&cfg.database_url)?;

    let db = Arc::new(Database::new(cfg.database_url.clone()));

    // --- Handle migration mode ---
    if migrate {
        db.ensure_connected().await?;
        tracing::info!("Schema migration complete.");
        return Ok(()); // exit after migration
    }

    // --- Warm the connection in eager mode; lazy defers to first request ---
    match cfg.connection_mode {
        ConnectionMode::Eager => {
            if let Err(err) = db.ensure_connected().await {
                tracing::warn!(
                    "Initial store connection failed, will retry per request: {err}"
                );
            }
        }
        ConnectionMode::Lazy => {
            tracing::info!("Lazy connection mode; store connection deferred to first request");
        }
    }

    // --- Initialize core service ---
    let service = MovieService::new(db);

    // --- Build router ---
    let app: Router = routes::routes::routes()
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Inspect the SQLite file path behind the store URL and make sure its
/// parent directory exists. Connection establishment itself is deferred to
/// the connection manager.
fn prepare_database_path(db_url: &str) -> Result<()> {
    tracing::debug!("Store URL => {}", db_url);

    // Extract the local file path SQLx will use
    let db_path = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("file:");
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if db_path.is_empty() || db_path == ":memory:" {
        return Ok(());
    }
    tracing::debug!("Interpreted SQLite path => {}", db_path);

    // Check filesystem state before any connect happens
    let db_path_obj = Path::new(db_path);
    tracing::debug!("Absolute path => {:?}", fs::canonicalize(db_path_obj).ok());
    tracing::debug!(
        "Exists? {}, Is file? {}, Parent exists? {}",
        db_path_obj.exists(),
        db_path_obj.is_file(),
        db_path_obj.parent().map(|p| p.exists()).unwrap_or(false)
    );

    // Create parent directory if needed
    if let Some(parent) = db_path_obj.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created missing directory {:?}", parent);
        }
    }

    // Try opening manually before SQLx
    match fs::OpenOptions::new().create(true).write(true).open(db_path) {
        Ok(_) => tracing::debug!("Database file can be created/opened successfully."),
        Err(e) => tracing::warn!("Failed to open database file manually: {}", e),
    }

    Ok(())
}
