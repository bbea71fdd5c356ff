//! Database initialization, connection pooling, and lifecycle management.
//!
//! Uses SQLite in WAL mode with r2d2 connection pooling. Runs an integrity
//! check on startup when configured.

use std::path::Path;
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{error, info, warn};

use manna_core::config::DatabaseConfig;
use manna_core::error::{MannaError, MannaResult};

use crate::schema;

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Store wrapper providing initialization, pooling, and lifecycle management.
#[derive(Clone)]
pub struct Store {
    pool: Arc<DbPool>,
}

impl Store {
    /// Initialize the store at the given path with the provided configuration.
    ///
    /// This:
    /// 1. Creates the database file and parent directories if needed
    /// 2. Enables WAL mode for concurrent read/write
    /// 3. Sets up connection pooling
    /// 4. Runs an integrity check if configured
    /// 5. Creates the schema tables
    pub fn init(db_path: &Path, config: &DatabaseConfig) -> MannaResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("initializing store at {}", db_path.display());

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_customizer(Box::new(ConnectionCustomizer {
                wal_mode: config.wal_mode,
            }))
            .build(manager)
            .map_err(|e| MannaError::Pool(e.to_string()))?;

        let store = Self {
            pool: Arc::new(pool),
        };

        if config.integrity_check_on_startup {
            store.run_integrity_check()?;
        }

        {
            let conn = store.conn()?;
            schema::create_tables(&conn)?;
        }

        info!("store initialized successfully");
        Ok(store)
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> MannaResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| MannaError::Pool(e.to_string()))
    }

    /// Run a SQLite integrity check.
    pub fn run_integrity_check(&self) -> MannaResult<()> {
        let conn = self.conn()?;
        let result: String = conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))
            .map_err(|e| MannaError::Database(e.to_string()))?;

        if result != "ok" {
            error!("store integrity check failed: {result}");
            return Err(MannaError::IntegrityCheck(result));
        }

        info!("store integrity check passed");
        Ok(())
    }

    /// Execute a function within a database transaction.
    pub fn transaction<T, F>(&self, f: F) -> MannaResult<T>
    where
        F: FnOnce(&Connection) -> MannaResult<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| MannaError::Database(e.to_string()))?;

        let result = f(&tx)?;

        tx.commit()
            .map_err(|e| MannaError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Number of persisted keys.
    pub fn key_count(&self) -> MannaResult<i64> {
        let conn = self.conn()?;
        conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .map_err(|e| MannaError::Database(e.to_string()))
    }

    /// Reset the store by dropping and recreating all tables.
    pub fn reset(&self) -> MannaResult<()> {
        warn!("resetting store - all persisted state will be lost");
        let conn = self.conn()?;
        schema::drop_tables(&conn)?;
        schema::create_tables(&conn)?;
        info!("store reset complete");
        Ok(())
    }
}

/// r2d2 connection customizer that applies PRAGMA settings.
#[derive(Debug)]
struct ConnectionCustomizer {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA temp_store=MEMORY;
             PRAGMA busy_timeout=5000;",
        )?;

        Ok(())
    }
}
