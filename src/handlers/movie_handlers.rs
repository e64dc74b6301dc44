//! HTTP handlers for the movie resource.
//!
//! Each handler translates one request into one `MovieService` call and the
//! result back into JSON. Store failures are mapped to the operation's error
//! message; a missing identifier is the fixed 404 body.

use crate::{
    errors::AppError,
    models::movie::{Movie, MovieDraft},
    services::movie_service::MovieService,
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

/// Response body for `DELETE /movies/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMovieResponse {
    pub message: String,
    pub deleted_movie: Movie,
}

/// GET `/movies/top-rated` — top 5 by rating descending.
pub async fn list_top_rated(
    State(service): State<MovieService>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = service
        .list_top_rated()
        .await
        .map_err(|err| AppError::from_store("Error fetching top rated movies", err))?;
    Ok(Json(movies))
}

/// GET `/movies/recent` — 6 most recently added.
pub async fn list_recent(
    State(service): State<MovieService>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = service
        .list_recent()
        .await
        .map_err(|err| AppError::from_store("Error fetching recent movies", err))?;
    Ok(Json(movies))
}

/// GET `/movies/user/{email}` — movies submitted by one user. An empty
/// result is a success, never a 404.
pub async fn list_user_movies(
    State(service): State<MovieService>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = service
        .list_user_movies(&email)
        .await
        .map_err(|err| AppError::from_store("Error fetching user movies", err))?;
    Ok(Json(movies))
}

/// GET `/movies/{id}` — single movie by identifier.
pub async fn get_movie(
    State(service): State<MovieService>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, AppError> {
    let movie = service
        .get_movie(&id)
        .await
        .map_err(|err| AppError::from_store("Error fetching movie", err))?;
    Ok(Json(movie))
}

/// GET `/movies` — the whole catalog.
pub async fn list_movies(
    State(service): State<MovieService>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = service
        .list_movies()
        .await
        .map_err(|err| AppError::from_store("Error fetching movies", err))?;
    Ok(Json(movies))
}

/// POST `/movies` — create a movie from whatever fields the body carries.
pub async fn create_movie(
    State(service): State<MovieService>,
    Json(draft): Json<MovieDraft>,
) -> Result<Json<Movie>, AppError> {
    let movie = service
        .create_movie(draft)
        .await
        .map_err(|err| AppError::from_store("Error adding movie", err))?;
    Ok(Json(movie))
}

/// PUT `/movies/{id}` — merge the present body fields into the record.
pub async fn update_movie(
    State(service): State<MovieService>,
    Path(id): Path<String>,
    Json(draft): Json<MovieDraft>,
) -> Result<Json<Movie>, AppError> {
    let movie = service
        .update_movie(&id, draft)
        .await
        .map_err(|err| AppError::from_store("Error updating movie", err))?;
    Ok(Json(movie))
}

/// DELETE `/movies/{id}` — remove the record and echo it back.
pub async fn delete_movie(
    State(service): State<MovieService>,
    Path(id): Path<String>,
) -> Result<Json<DeleteMovieResponse>, AppError> {
    let movie = service
        .delete_movie(&id)
        .await
        .map_err(|err| AppError::from_store("Error deleting movie", err))?;
    Ok(Json(DeleteMovieResponse {
        message: "Movie deleted successfully".into(),
        deleted_movie: movie,
    }))
}
