/// PostgreSQL pool setup
///
/// One `PgPool` is built at startup, probed once, shared through the store
/// and closed after the server drains.
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::new("postgresql://localhost/taskbook", 10)).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Upper bound on open connections
    pub max_connections: u32,

    /// Idle connections kept warm
    pub min_connections: u32,

    /// Wait for a free connection before a request fails with 500
    pub acquire_timeout: Duration,

    /// Idle connections older than this are closed
    pub idle_timeout: Option<Duration>,

    /// Connections older than this are recycled
    pub max_lifetime: Option<Duration>,
}

impl DatabaseConfig {
    /// Settings for `url` with the given pool size and default timeouts
    pub fn new(url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections,
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(10 * 60)),
            max_lifetime: Some(Duration::from_secs(30 * 60)),
        }
    }
}

/// Connects a pool and runs one probe query
///
/// # Errors
///
/// Fails on a malformed URL, an unreachable server or a failing probe.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;

    info!("PostgreSQL pool ready");
    Ok(pool)
}

/// Round-trips a trivial query through the pool
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("Probing database");
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Waits for checked-out connections to return, then closes the pool
pub async fn close_pool(pool: PgPool) {
    info!("Closing PostgreSQL pool");
    pool.close().await;
}
