//! Represents a movie record in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single movie record.
///
/// Every content field is optional: the schema is advisory, and a record
/// with any subset of fields is a valid state. Only the identifier and the
/// timestamps are store-assigned and always present.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Store-assigned identifier, unique and immutable after creation.
    pub id: Uuid,

    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i64>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub rating: Option<f64>,
    pub duration: Option<i64>,
    pub plot_summary: Option<String>,
    pub poster_url: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,

    /// Email of the submitting user. Treated as an opaque correlation key;
    /// nothing checks that the identity exists.
    pub added_by: Option<String>,

    /// Set once at creation.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update.
///
/// Any subset of fields may be present. Unknown fields are accepted and
/// dropped. On update, absent fields leave the stored value unchanged.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i64>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub rating: Option<f64>,
    pub duration: Option<i64>,
    pub plot_summary: Option<String>,
    pub poster_url: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub added_by: Option<String>,
}
