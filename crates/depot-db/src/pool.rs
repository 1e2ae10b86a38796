//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  DbConfig::new(path) / DbConfig::from_env()                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │◄── mapped repositories   │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       ▲                                                                 │
//! │       │ same pool, wrapped                                              │
//! │  sea_orm::DatabaseConnection ◄────────────── tracked repositories      │
//! │                                                                         │
//! │  Every repository call checks a connection out and returns it when     │
//! │  the call finishes, on success and on error alike.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::mapped::{MappedOrderRepository, MappedProductRepository};
use crate::repository::tracked::{TrackedOrderRepository, TrackedProductRepository};
use crate::repository::{OrderRepository, ProductRepository, Strategy};

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable holding the database file path.
pub const ENV_DATABASE_PATH: &str = "DEPOT_DATABASE_PATH";
/// Environment variable holding the pool size.
pub const ENV_MAX_CONNECTIONS: &str = "DEPOT_MAX_CONNECTIONS";
/// Environment variable holding the acquire timeout in seconds.
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "DEPOT_CONNECT_TIMEOUT_SECS";
/// Environment variable toggling migrations on connect.
pub const ENV_RUN_MIGRATIONS: &str = "DEPOT_RUN_MIGRATIONS";

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/depot.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long a call may wait for a pooled connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps it forever.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Maximum lifetime of a connection. `None` keeps it forever.
    /// Default: 30 minutes
    pub max_lifetime: Option<Duration>,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
            run_migrations: true,
        }
    }

    /// Loads configuration from environment variables with fallback to defaults.
    ///
    /// ## Variables
    /// - `DEPOT_DATABASE_PATH` (default `./depot.db`)
    /// - `DEPOT_MAX_CONNECTIONS` (default 5)
    /// - `DEPOT_CONNECT_TIMEOUT_SECS` (default 30)
    /// - `DEPOT_RUN_MIGRATIONS` (default true)
    pub fn from_env() -> DbResult<Self> {
        let path = env::var(ENV_DATABASE_PATH).unwrap_or_else(|_| "./depot.db".to_string());
        let mut config = DbConfig::new(path);

        if let Ok(raw) = env::var(ENV_MAX_CONNECTIONS) {
            config.max_connections = parse_var(ENV_MAX_CONNECTIONS, &raw)?;
        }
        if let Ok(raw) = env::var(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout = Duration::from_secs(parse_var(ENV_CONNECT_TIMEOUT_SECS, &raw)?);
        }
        if let Ok(raw) = env::var(ENV_RUN_MIGRATIONS) {
            config.run_migrations = parse_var(ENV_RUN_MIGRATIONS, &raw)?;
        }

        if config.min_connections > config.max_connections {
            config.min_connections = config.max_connections;
        }

        Ok(config)
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            // The database lives and dies with its only connection
            idle_timeout: None,
            max_lifetime: None,
            run_migrations: true,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> DbResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| DbError::InvalidConfig(format!("{name}={raw}")))
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// sea-orm view of the same pool.
    orm: DatabaseConnection,
}

/// A product and order repository pair of one strategy.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Orders reference products; SQLite leaves FKs off by default
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database::from_pool(pool);

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Wraps an existing pool without running migrations.
    pub fn from_pool(pool: SqlitePool) -> Self {
        let orm = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
        Database { pool, orm }
    }

    /// Runs database migrations.
    ///
    /// ## When To Call
    /// - Automatically called by `new()` if `run_migrations` is true
    /// - Manually call when migrations are disabled in config
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the sea-orm connection over the same pool.
    pub fn orm(&self) -> &DatabaseConnection {
        &self.orm
    }

    /// Returns the product repository (mapped strategy).
    pub fn products(&self) -> MappedProductRepository {
        MappedProductRepository::new(self.pool.clone())
    }

    /// Returns the order repository (mapped strategy).
    pub fn orders(&self) -> MappedOrderRepository {
        MappedOrderRepository::new(self.pool.clone())
    }

    /// Returns the product repository (tracked strategy).
    pub fn tracked_products(&self) -> TrackedProductRepository {
        TrackedProductRepository::new(self.orm.clone())
    }

    /// Returns the order repository (tracked strategy).
    pub fn tracked_orders(&self) -> TrackedOrderRepository {
        TrackedOrderRepository::new(self.orm.clone())
    }

    /// Returns both repositories of the given strategy behind the shared traits.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let repos = db.repositories(Strategy::Tracked);
    /// let orders = repos.orders.get_by_filter(&OrderFilter::new().year(2023)).await?;
    /// ```
    pub fn repositories(&self, strategy: Strategy) -> Repositories {
        match strategy {
            Strategy::Mapped => Repositories {
                products: Arc::new(self.products()),
                orders: Arc::new(self.orders()),
            },
            Strategy::Tracked => Repositories {
                products: Arc::new(self.tracked_products()),
                orders: Arc::new(self.tracked_orders()),
            },
        }
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        let db = Database::new(config).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_closed_pool_fails_fast() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        let err = db.products().list_all().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_in_memory_connection_is_never_reaped() {
        let config = DbConfig::in_memory();

        assert_eq!(config.max_connections, 1);
        assert_eq!(config.idle_timeout, None);
        assert_eq!(config.max_lifetime, None);

        let file = DbConfig::new("/tmp/test.db");
        assert_eq!(file.idle_timeout, Some(Duration::from_secs(600)));
        assert_eq!(file.max_lifetime, Some(Duration::from_secs(1800)));
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        assert_eq!(parse_var::<u32>(ENV_MAX_CONNECTIONS, " 8 ").unwrap(), 8);
        let err = parse_var::<u32>(ENV_MAX_CONNECTIONS, "many").unwrap_err();
        assert!(matches!(err, DbError::InvalidConfig(msg) if msg == "DEPOT_MAX_CONNECTIONS=many"));
    }
}
