//! Data model for the movie catalog service.
//!
//! The entity maps to its database table via `sqlx::FromRow` and serializes
//! as camelCase JSON via `serde`.

pub mod movie;
