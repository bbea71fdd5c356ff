//! Database schema definition and table creation.
//!
//! The original app stored everything in AsyncStorage as JSON strings under
//! fixed keys. The schema keeps that contract: a single key-value table.

use rusqlite::Connection;
use tracing::info;

use manna_core::error::{MannaError, MannaResult};

/// Complete SQL schema.
const SCHEMA_SQL: &str = r#"
-- JSON-encoded records keyed by fixed storage keys
CREATE TABLE IF NOT EXISTS kv (
    key     TEXT PRIMARY KEY,
    value   TEXT NOT NULL
);
"#;

/// Create all tables if they do not exist.
pub fn create_tables(conn: &Connection) -> MannaResult<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| MannaError::Database(format!("failed to create schema: {e}")))?;
    info!("store schema verified");
    Ok(())
}

/// Drop all tables (used for store reset).
pub fn drop_tables(conn: &Connection) -> MannaResult<()> {
    conn.execute_batch("DROP TABLE IF EXISTS kv;")
        .map_err(|e| MannaError::Database(format!("failed to drop tables: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_drop_and_recreate() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn.execute("INSERT INTO kv (key, value) VALUES ('a', '1')", [])
            .unwrap();
        drop_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
