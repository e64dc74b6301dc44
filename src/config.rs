use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::env;

/// When the store connection is first established.
///
/// `Eager` is the long-lived-process variant: connect once during startup.
/// `Lazy` defers the first connect to the first request, the behavior needed
/// when a warm instance may be created per request. Both modes re-attempt on
/// every request while the connection is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectionMode {
    Eager,
    Lazy,
}

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub connection_mode: ConnectionMode,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Movie catalog REST API")]
pub struct Args {
    /// Host to bind to (overrides MOVIE_STORE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides MOVIE_STORE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides MOVIE_STORE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Connection mode (overrides MOVIE_STORE_CONNECTION_MODE)
    #[arg(long, value_enum)]
    pub connection_mode: Option<ConnectionMode>,

    /// Apply the schema and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("MOVIE_STORE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("MOVIE_STORE_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing MOVIE_STORE_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading MOVIE_STORE_PORT"),
        };
        let env_db = env::var("MOVIE_STORE_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/movies.db".into());
        let env_mode = match env::var("MOVIE_STORE_CONNECTION_MODE") {
            Ok(value) => ConnectionMode::from_str(&value, true).map_err(|reason| {
                anyhow::anyhow!("parsing MOVIE_STORE_CONNECTION_MODE value `{value}`: {reason}")
            })?,
            Err(env::VarError::NotPresent) => ConnectionMode::Eager,
            Err(err) => return Err(err).context("reading MOVIE_STORE_CONNECTION_MODE"),
        };

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            connection_mode: args.connection_mode.unwrap_or(env_mode),
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
