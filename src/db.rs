// ==========================================
// SteelWorks Operations - SQLite connection setup
// ==========================================
// Goals:
// - every Connection::open goes through the same PRAGMA setup, so foreign
//   keys (cascade/restrict) are enforced on every session
// - one place to apply the bundled schema and check its version
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::path::Path;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version the queries in this crate are written against
/// (kept in step with `scripts/schema.sql`).
///
/// Only used for warnings; nothing is migrated automatically.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Canonical schema definition
pub const SCHEMA_SQL: &str = include_str!("../scripts/schema.sql");

/// Development seed data
pub const SEED_SQL: &str = include_str!("../scripts/seed.sql");

/// Apply the per-connection PRAGMAs
///
/// foreign_keys and busy_timeout are per-connection settings in SQLite and
/// must be set on every new connection.
pub fn configure_sqlite_connection(conn: &Connection, busy_timeout_ms: u64) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(())
}

/// Open a file-backed SQLite connection with the standard configuration
pub fn open_sqlite_connection<P: AsRef<Path>>(
    db_path: P,
    busy_timeout_ms: u64,
) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn, busy_timeout_ms)?;
    Ok(conn)
}

/// Open an in-memory SQLite connection with the standard configuration
pub fn open_in_memory_connection() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
    Ok(conn)
}

/// Create all tables and indexes (idempotent)
pub fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Load the development seed data (idempotent)
pub fn apply_seed(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SEED_SQL)
}

/// Read schema_version (None when the table does not exist)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Log a warning when the store was not initialised with the expected schema
pub fn warn_on_schema_mismatch(conn: &Connection) -> rusqlite::Result<()> {
    match read_schema_version(conn)? {
        Some(v) if v == CURRENT_SCHEMA_VERSION => {}
        Some(v) => tracing::warn!(
            found = v,
            expected = CURRENT_SCHEMA_VERSION,
            "schema_version mismatch, run init_db against this store"
        ),
        None => tracing::warn!(
            expected = CURRENT_SCHEMA_VERSION,
            "schema_version table missing, store not initialised"
        ),
    }
    Ok(())
}
