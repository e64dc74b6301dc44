//! Process-wide connection lifecycle for the movie store.
//!
//! The original deployment target re-created its store connection on every
//! cold start, so the handle is established lazily and reused for the rest
//! of the process lifetime. `ensure_connected` is the only state mutator;
//! concurrent callers serialize on the state lock, so at most one connect
//! attempt is in flight at a time.

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Advisory schema, applied statement-wise after every successful connect.
const SCHEMA: &str = include_str!("../migrations/0001_init.sql");

/// Returned when a connection could not be established. The next request
/// re-attempts; the process never exits over this.
#[derive(Debug, Clone, Error)]
#[error("document store unavailable: {reason}")]
pub struct StoreUnavailable {
    reason: String,
}

/// Lifecycle of the single store handle.
///
/// `Connected` is never re-validated: once live, the pool is handed out
/// as-is for the rest of the process lifetime. `Failed` is retryable.
enum ConnectionState {
    Uninitialized,
    Connecting,
    Connected(SqlitePool),
    Failed,
}

impl ConnectionState {
    fn name(&self) -> &'static str {
        match self {
            ConnectionState::Uninitialized => "uninitialized",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected(_) => "connected",
            ConnectionState::Failed => "failed",
        }
    }
}

/// Lazily-connected handle to the backing document store.
pub struct Database {
    url: String,
    state: Mutex<ConnectionState>,
}

impl Database {
    /// Create an unconnected database handle. No I/O happens here.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: Mutex::new(ConnectionState::Uninitialized),
        }
    }

    /// Return the live pool, establishing it first if necessary.
    ///
    /// If a previous attempt failed, this attempts again. The state lock is
    /// held across the connect await, so a burst of cold-start requests
    /// produces exactly one connection.
    pub async fn ensure_connected(&self) -> Result<SqlitePool, StoreUnavailable> {
        let mut state = self.state.lock().await;
        if let ConnectionState::Connected(pool) = &*state {
            return Ok(pool.clone());
        }

        *state = ConnectionState::Connecting;
        info!("connecting to document store at {}", self.url);
        match self.connect().await {
            Ok(pool) => {
                info!("connected to document store");
                *state = ConnectionState::Connected(pool.clone());
                Ok(pool)
            }
            Err(err) => {
                error!("document store connection failed: {err}");
                *state = ConnectionState::Failed;
                Err(StoreUnavailable {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// One connect attempt plus advisory schema application.
    async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&self.url)
            .await?;

        for stmt in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            debug!("applying schema statement: {stmt}");
            sqlx::query(stmt).execute(&pool).await?;
        }

        Ok(pool)
    }

    /// Non-blocking state readout for readiness probes. Reports
    /// "connecting" when another task currently holds the lock.
    pub fn status(&self) -> &'static str {
        match self.state.try_lock() {
            Ok(state) => state.name(),
            Err(_) => "connecting",
        }
    }
}
