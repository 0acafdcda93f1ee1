use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::insert_working_time;
use crate::errors::{AppError, AppResult};
use crate::models::{Location, WorkingTime};
use crate::utils::time::check_span;
use chrono::{NaiveDate, NaiveTime};

/// Validated input of the `add` command.
#[derive(Debug, Clone)]
pub struct NewWorkingTime {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
    pub lunch: i32,
    pub location: Location,
    pub note: String,
}

impl NewWorkingTime {
    fn validate(&self) -> AppResult<()> {
        if self.lunch < 0 {
            return Err(AppError::InvalidRange(format!(
                "lunch break cannot be negative ({})",
                self.lunch
            )));
        }
        check_span(self.start, self.end)?;

        if let Some(end) = self.end {
            let span = (end - self.start).num_minutes();
            if i64::from(self.lunch) >= span {
                return Err(AppError::InvalidRange(format!(
                    "lunch break of {} min does not fit in {} min of work",
                    self.lunch, span
                )));
            }
        }
        Ok(())
    }
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Stores the entry and returns its id.
    pub fn apply(pool: &mut DbPool, input: NewWorkingTime) -> AppResult<i64> {
        input.validate()?;

        let record = WorkingTime::new(
            input.date,
            input.start,
            input.end,
            input.lunch,
            input.location,
        )
        .with_note(input.note);
        let id = insert_working_time(&pool.conn, &record)?;

        ttlog_or_warn(
            &pool.conn,
            "add",
            &id.to_string(),
            &format!(
                "{} {} → {} ({})",
                record.date_str(),
                record.start_str(),
                record.end_str(),
                record.location.code()
            ),
        );
        tracing::debug!(id, date = %record.date, "working time added");

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::load_working_time;

    fn input(start: &str, end: Option<&str>, lunch: i32) -> NewWorkingTime {
        NewWorkingTime {
            date: NaiveDate::from_ymd_opt(2023, 2, 3).unwrap(),
            start: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end: end.map(|e| NaiveTime::parse_from_str(e, "%H:%M").unwrap()),
            lunch,
            location: Location::Mixed,
            note: "standup".into(),
        }
    }

    fn pool() -> DbPool {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        DbPool { conn }
    }

    #[test]
    fn stores_valid_entry() {
        let mut pool = pool();
        let id = AddLogic::apply(&mut pool, input("08:10", Some("17:10"), 60)).unwrap();
        let stored = load_working_time(&pool.conn, id).unwrap().unwrap();
        assert_eq!(stored.worked_minutes(), Some(480));
        assert_eq!(stored.note, "standup");
        assert_eq!(stored.location, Location::Mixed);
    }

    #[test]
    fn rejects_backwards_span_and_oversized_lunch() {
        let mut pool = pool();
        assert!(matches!(
            AddLogic::apply(&mut pool, input("17:00", Some("09:00"), 0)),
            Err(AppError::InvalidRange(_))
        ));
        assert!(matches!(
            AddLogic::apply(&mut pool, input("09:00", Some("09:30"), 30)),
            Err(AppError::InvalidRange(_))
        ));
        assert!(matches!(
            AddLogic::apply(&mut pool, input("09:00", None, -5)),
            Err(AppError::InvalidRange(_))
        ));
    }
}
