use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

mod advisory;
mod farming;
mod market_prices;
mod schema;
mod weather_alerts;

pub use market_prices::DEMO_PRICES;
pub use weather_alerts::ALERT_LIST_LIMIT;

use crate::config::AppConfig;
use crate::Result;

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool_options(config: &AppConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(Duration::from_secs(config.connection_timeout()))
    }

    /// Create a new database instance from configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let pool = Self::pool_options(config)
            .connect(config.database_url())
            .await?;

        tracing::info!(
            "Database pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool))
    }

    /// Pool that connects on first use
    ///
    /// Lets the server start (and answer chat and planner requests) while the
    /// database is still unreachable.
    pub fn connect_lazy(config: &AppConfig) -> Result<Self> {
        let pool = Self::pool_options(config)
            .min_connections(0)
            .connect_lazy(config.database_url())?;
        Ok(Self::new(pool))
    }

    /// Get a reference to the database pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}
