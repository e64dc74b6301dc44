//! Defines routes for the movie catalog API.
//!
//! ## Structure
//! - **Operational endpoints**
//!   - `GET    /` — bare liveness string
//!   - `GET    /healthz` — liveness JSON
//!   - `GET    /readyz` — readiness (store connectivity)
//!
//! - **Movie endpoints**
//!   - `GET    /movies/top-rated` — top 5 by rating descending
//!   - `GET    /movies/recent` — 6 most recently added
//!   - `GET    /movies/user/{email}` — movies submitted by one user
//!   - `GET    /movies/{id}` — single movie
//!   - `GET    /movies` — whole catalog
//!   - `POST   /movies` — create
//!   - `PUT    /movies/{id}` — partial update
//!   - `DELETE /movies/{id}` — delete
//!
//! The static segments (`top-rated`, `recent`, `user`) take precedence over
//! the `{id}` capture.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz, root},
        movie_handlers::{
            create_movie, delete_movie, get_movie, list_movies, list_recent, list_top_rated,
            list_user_movies, update_movie,
        },
    },
    services::movie_service::MovieService,
};
use axum::{Router, routing::get};

/// Build and return the router for all movie catalog routes.
///
/// The router carries shared state (`MovieService`) to all handlers.
pub fn routes() -> Router<MovieService> {
    Router::new()
        // operational endpoints (mounted at root)
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // filtered read views, registered beside the {id} capture
        .route("/movies/top-rated", get(list_top_rated))
        .route("/movies/recent", get(list_recent))
        .route("/movies/user/{email}", get(list_user_movies))
        // collection + single-record routes
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::{TempDir, tempdir};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> (TempDir, Router) {
        let dir = tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("movies.db").display()
        );
        let service = MovieService::new(Arc::new(Database::new(url)));
        (dir, routes().with_state(service))
    }

    fn get_request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_serves_the_liveness_string() {
        let (_dir, app) = app();
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            "movie-store server running"
        );
    }

    #[tokio::test]
    async fn create_get_delete_lifecycle() {
        let (_dir, app) = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/movies",
                json!({"title": "Inception", "rating": 8.8}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["title"], "Inception");
        assert_eq!(created["rating"], 8.8);
        assert!(created["createdAt"].is_string());

        let response = app
            .clone()
            .oneshot(get_request(&format!("/movies/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["title"], "Inception");
        assert_eq!(fetched["rating"], 8.8);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/movies/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let deleted = body_json(response).await;
        assert_eq!(deleted["message"], "Movie deleted successfully");
        assert_eq!(deleted["deletedMovie"]["title"], "Inception");

        let response = app
            .oneshot(get_request(&format!("/movies/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let missing = body_json(response).await;
        assert_eq!(missing["message"], "Movie not found");
    }

    #[tokio::test]
    async fn unknown_user_gets_an_empty_list() {
        let (_dir, app) = app();
        let response = app
            .oneshot(get_request("/movies/user/nobody@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn updating_a_missing_movie_is_404() {
        let (_dir, app) = app();
        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/movies/{}", Uuid::new_v4()),
                json!({"title": "Ghost"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Movie not found");
    }

    #[tokio::test]
    async fn malformed_id_is_a_store_error_not_a_miss() {
        let (_dir, app) = app();
        let response = app.oneshot(get_request("/movies/not-a-uuid")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Error fetching movie");
        assert!(body["error"].as_str().unwrap().contains("not-a-uuid"));
    }

    #[tokio::test]
    async fn unknown_body_fields_are_ignored_on_create() {
        let (_dir, app) = app();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/movies",
                json!({"title": "Inception", "boxOffice": "836M"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["title"], "Inception");
        assert!(created.get("boxOffice").is_none());
    }
}
