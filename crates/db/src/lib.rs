//! Postgres access layer: pool construction, migrations, models, and
//! repositories.

pub mod models;
pub mod repositories;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

/// Migrations embedded at compile time from `crates/db/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Database connection settings, environment-sourced with local-dev
/// defaults.
///
/// | Variable      | Default      |
/// |---------------|--------------|
/// | `DB_HOST`     | `localhost`  |
/// | `DB_PORT`     | `5432`       |
/// | `DB_USER`     | `postgres`   |
/// | `DB_PASSWORD` | none         |
/// | `DB_NAME`     | `routewatch` |
/// | `DB_SSL`      | `false`      |
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
    pub ssl: bool,
}

impl DbConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5432),
            user: std::env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("DB_PASSWORD").ok(),
            name: std::env::var("DB_NAME").unwrap_or_else(|_| "routewatch".to_string()),
            ssl: std::env::var("DB_SSL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name)
            .ssl_mode(ssl_mode);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        options
    }
}

/// Build a lazily-connecting pool.
///
/// No I/O happens here: the first connection is opened on first use, so an
/// unreachable database surfaces as per-query errors instead of a startup
/// failure.
pub fn create_pool(config: &DbConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(config.connect_options())
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
