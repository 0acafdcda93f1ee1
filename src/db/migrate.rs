use crate::db::log::log_stamp;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step. Applied steps are recorded in the `log` table as
/// `migration_applied` rows whose target is the version.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_working_times",
        description: "Created working_times table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS working_times (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            lunch       INTEGER NOT NULL DEFAULT 0 CHECK(lunch >= 0),
            location    TEXT NOT NULL DEFAULT 'O' CHECK(location IN ('O','R','H','C','M')),
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250412_0002_add_note_and_date_index",
        description: "Added note column and date index to working_times",
        sql: r#"
        ALTER TABLE working_times ADD COLUMN note TEXT NOT NULL DEFAULT '';
        CREATE INDEX IF NOT EXISTS idx_working_times_date_start ON working_times(date, start_time);
        "#,
    },
];

/// Ensure that the `log` table exists; it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        [log_stamp().as_str(), m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations, oldest first.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    tracing::debug!(applied, "schema migrations checked");
    Ok(applied)
}
