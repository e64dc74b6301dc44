//! Liveness & readiness handlers.
//!
//! - GET /         -> bare liveness string
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks store connectivity

use crate::services::movie_service::MovieService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;

/// `GET /`
///
/// Bare liveness string, kept cheap and free of I/O.
pub async fn root() -> &'static str {
    "movie-store server running"
}

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON body.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Readiness probe that establishes the store connection if necessary and
/// runs a lightweight query (`SELECT 1`). Returns JSON describing the check
/// and the connection manager's state. HTTP 200 when the store answers,
/// HTTP 503 otherwise.
pub async fn readyz(State(service): State<MovieService>) -> impl IntoResponse {
    let store_check = match service.db.ensure_connected().await {
        Ok(pool) => match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&pool).await {
            Ok(1) => (true, None::<String>),
            Ok(v) => (false, Some(format!("unexpected result: {}", v))),
            Err(e) => (false, Some(format!("error: {}", e))),
        },
        Err(e) => (false, Some(e.to_string())),
    };

    let store_ok = store_check.0;
    let mut checks = HashMap::new();
    checks.insert(
        "store",
        CheckStatus {
            ok: store_ok,
            error: store_check.1,
        },
    );

    let body = ReadyResponse {
        status: if store_ok { "ok".into() } else { "error".into() },
        connection: service.db.status(),
        checks,
    };

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    connection: &'static str,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
