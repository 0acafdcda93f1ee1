use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let applied = run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))?;
    if applied > 0 {
        tracing::info!(applied, "schema migrations applied");
    }
    Ok(())
}
