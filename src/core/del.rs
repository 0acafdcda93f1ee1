use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_working_time, load_working_time};
use crate::errors::{AppError, AppResult};
use crate::models::WorkingTime;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Removes one entry and returns what was deleted.
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<WorkingTime> {
        let existing = load_working_time(&pool.conn, id)?.ok_or(AppError::NotFound(id))?;

        delete_working_time(&pool.conn, id)?;

        ttlog_or_warn(
            &pool.conn,
            "del",
            &id.to_string(),
            &format!("{} {} → {}", existing.date_str(), existing.start_str(), existing.end_str()),
        );
        Ok(existing)
    }
}
