//! src/services/movie_service.rs
//!
//! MovieService — the seven store operations behind the movie REST surface,
//! backed by SQLite. Every operation acquires the lazily-established
//! connection first, then issues exactly one query. There is no caching,
//! batching, or retry layer; failures surface immediately to the handler.

use crate::db::{Database, StoreUnavailable};
use crate::models::movie::{Movie, MovieDraft};
use chrono::Utc;
use sqlx::{QueryBuilder, sqlite::Sqlite};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie `{0}` not found")]
    MovieNotFound(String),
    #[error("invalid movie id `{id}`: {source}")]
    InvalidMovieId { id: String, source: uuid::Error },
    #[error(transparent)]
    Unavailable(#[from] StoreUnavailable),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

const TOP_RATED_LIMIT: i64 = 5;
const RECENT_LIMIT: i64 = 6;

/// All columns of a movie row, in struct order. `cast` is quoted because it
/// collides with the SQL keyword.
const MOVIE_COLUMNS: &str = r#"id, title, genre, release_year, director, "cast", rating, duration,
       plot_summary, poster_url, language, country, added_by, created_at, updated_at"#;

/// MovieService provides the movie catalog operations:
/// - Create a movie (store assigns identifier and timestamps)
/// - Get / list movies, including the three filtered read views
/// - Update a movie (field-presence merge, refreshes `updated_at`)
/// - Delete a movie (hard delete, returns the removed record)
///
/// Ties on rating and creation time are broken by identifier ascending so
/// repeated reads of the filtered views are stable.
#[derive(Clone)]
pub struct MovieService {
    /// Shared connection manager; every operation goes through
    /// `ensure_connected` before touching the store.
    pub db: Arc<Database>,
}

impl MovieService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Parse a path identifier. A malformed id is a store operation error,
    /// not a missing record.
    fn parse_id(id: &str) -> StoreResult<Uuid> {
        Uuid::parse_str(id).map_err(|source| StoreError::InvalidMovieId {
            id: id.to_string(),
            source,
        })
    }

    /// Top 5 movies by rating, highest first. Unrated movies sort last and
    /// fall out of the window once five rated ones exist.
    pub async fn list_top_rated(&self) -> StoreResult<Vec<Movie>> {
        let pool = self.db.ensure_connected().await?;
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY rating DESC, id ASC LIMIT ?"
        );
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(TOP_RATED_LIMIT)
            .fetch_all(&pool)
            .await?)
    }

    /// The 6 most recently created movies, newest first.
    pub async fn list_recent(&self) -> StoreResult<Vec<Movie>> {
        let pool = self.db.ensure_connected().await?;
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY created_at DESC, id ASC LIMIT ?"
        );
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(RECENT_LIMIT)
            .fetch_all(&pool)
            .await?)
    }

    /// Movies submitted by the given user email. The empty set is a normal
    /// result, not an error.
    pub async fn list_user_movies(&self, email: &str) -> StoreResult<Vec<Movie>> {
        let pool = self.db.ensure_connected().await?;
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE added_by = ? ORDER BY created_at DESC, id ASC"
        );
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(email)
            .fetch_all(&pool)
            .await?)
    }

    /// Fetch a single movie by identifier.
    pub async fn get_movie(&self, id: &str) -> StoreResult<Movie> {
        let movie_id = Self::parse_id(id)?;
        let pool = self.db.ensure_connected().await?;
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?");
        sqlx::query_as::<_, Movie>(&sql)
            .bind(movie_id)
            .fetch_one(&pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => StoreError::MovieNotFound(id.to_string()),
                other => StoreError::Sqlx(other),
            })
    }

    /// Every movie in the catalog, oldest first.
    pub async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let pool = self.db.ensure_connected().await?;
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY created_at ASC, id ASC");
        Ok(sqlx::query_as::<_, Movie>(&sql).fetch_all(&pool).await?)
    }

    /// Insert a new movie. The store assigns the identifier and both
    /// timestamps; everything else comes from the draft as-is.
    pub async fn create_movie(&self, draft: MovieDraft) -> StoreResult<Movie> {
        let pool = self.db.ensure_connected().await?;
        let now = Utc::now();
        let sql = format!(
            r#"INSERT INTO movies (id, title, genre, release_year, director, "cast", rating, duration,
                    plot_summary, poster_url, language, country, added_by, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {MOVIE_COLUMNS}"#
        );
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(Uuid::new_v4())
            .bind(draft.title)
            .bind(draft.genre)
            .bind(draft.release_year)
            .bind(draft.director)
            .bind(draft.cast)
            .bind(draft.rating)
            .bind(draft.duration)
            .bind(draft.plot_summary)
            .bind(draft.poster_url)
            .bind(draft.language)
            .bind(draft.country)
            .bind(draft.added_by)
            .bind(now)
            .bind(now)
            .fetch_one(&pool)
            .await?)
    }

    /// Merge the present draft fields into an existing movie and return the
    /// post-update state. Absent fields are left untouched; `updated_at` is
    /// always refreshed.
    pub async fn update_movie(&self, id: &str, draft: MovieDraft) -> StoreResult<Movie> {
        let movie_id = Self::parse_id(id)?;
        let pool = self.db.ensure_connected().await?;

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE movies SET updated_at = ");
        builder.push_bind(Utc::now());
        if let Some(title) = draft.title {
            builder.push(", title = ");
            builder.push_bind(title);
        }
        if let Some(genre) = draft.genre {
            builder.push(", genre = ");
            builder.push_bind(genre);
        }
        if let Some(release_year) = draft.release_year {
            builder.push(", release_year = ");
            builder.push_bind(release_year);
        }
        if let Some(director) = draft.director {
            builder.push(", director = ");
            builder.push_bind(director);
        }
        if let Some(cast) = draft.cast {
            builder.push(r#", "cast" = "#);
            builder.push_bind(cast);
        }
        if let Some(rating) = draft.rating {
            builder.push(", rating = ");
            builder.push_bind(rating);
        }
        if let Some(duration) = draft.duration {
            builder.push(", duration = ");
            builder.push_bind(duration);
        }
        if let Some(plot_summary) = draft.plot_summary {
            builder.push(", plot_summary = ");
            builder.push_bind(plot_summary);
        }
        if let Some(poster_url) = draft.poster_url {
            builder.push(", poster_url = ");
            builder.push_bind(poster_url);
        }
        if let Some(language) = draft.language {
            builder.push(", language = ");
            builder.push_bind(language);
        }
        if let Some(country) = draft.country {
            builder.push(", country = ");
            builder.push_bind(country);
        }
        if let Some(added_by) = draft.added_by {
            builder.push(", added_by = ");
            builder.push_bind(added_by);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(movie_id);
        builder.push(format!(" RETURNING {MOVIE_COLUMNS}"));

        builder
            .build_query_as::<Movie>()
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| StoreError::MovieNotFound(id.to_string()))
    }

    /// Remove a movie entirely and return the removed record. There is no
    /// soft delete; a second call for the same id is a miss.
    pub async fn delete_movie(&self, id: &str) -> StoreResult<Movie> {
        let movie_id = Self::parse_id(id)?;
        let pool = self.db.ensure_connected().await?;
        let sql = format!("DELETE FROM movies WHERE id = ? RETURNING {MOVIE_COLUMNS}");
        sqlx::query_as::<_, Movie>(&sql)
            .bind(movie_id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| StoreError::MovieNotFound(id.to_string()))
    }
}
