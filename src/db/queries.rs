use crate::errors::{AppError, AppResult};
use crate::models::{Location, WorkingTime};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_COLUMNS: &str = "SELECT id, date, start_time, end_time, lunch, location, note, \
                              created_at FROM working_times";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_hhmm(col: usize, raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| conversion_error(col, AppError::InvalidTime(raw.to_string())))
}

pub fn map_row(row: &Row) -> Result<WorkingTime> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(1, AppError::InvalidDate(date_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let start = parse_hhmm(2, &start_str)?;

    let end = match row.get::<_, Option<String>>("end_time")? {
        Some(raw) => Some(parse_hhmm(3, &raw)?),
        None => None,
    };

    let loc_str: String = row.get("location")?;
    let location = Location::from_db_str(&loc_str).ok_or_else(|| {
        conversion_error(5, AppError::InvalidPosition(format!("Invalid location: {}", loc_str)))
    })?;

    Ok(WorkingTime {
        id: row.get("id")?,
        date,
        start,
        end,
        lunch: row.get("lunch")?,
        location,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

/// Every working time, ordered by day and start time.
pub fn load_all_working_times(conn: &Connection) -> Result<Vec<WorkingTime>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} ORDER BY date ASC, start_time ASC, id ASC"
    ))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_working_time(conn: &Connection, id: i64) -> AppResult<Option<WorkingTime>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Inserts the entry and returns its new row id.
pub fn insert_working_time(conn: &Connection, wt: &WorkingTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO working_times (date, start_time, end_time, lunch, location, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            wt.date_str(),
            wt.start_str(),
            wt.end.map(|t| t.format("%H:%M").to_string()),
            wt.lunch,
            wt.location.to_db_str(),
            wt.note,
            wt.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_working_time(conn: &Connection, id: i64) -> AppResult<()> {
    let affected = conn.execute("DELETE FROM working_times WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(AppError::NotFound(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    fn sample(date: &str, start: &str, end: Option<&str>) -> WorkingTime {
        WorkingTime::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end.map(|e| NaiveTime::parse_from_str(e, "%H:%M").unwrap()),
            30,
            Location::Remote,
        )
    }

    #[test]
    fn insert_and_load_keeps_day_order() {
        let conn = memory_db();
        insert_working_time(&conn, &sample("2023-02-03", "13:00", Some("17:10"))).unwrap();
        insert_working_time(&conn, &sample("2023-02-03", "08:10", Some("12:00"))).unwrap();
        insert_working_time(&conn, &sample("2023-02-02", "09:00", None)).unwrap();

        let all = load_all_working_times(&conn).unwrap();
        let starts: Vec<String> = all
            .iter()
            .map(|w| format!("{} {}", w.date_str(), w.start_str()))
            .collect();
        assert_eq!(starts, vec!["2023-02-02 09:00", "2023-02-03 08:10", "2023-02-03 13:00"]);
        assert_eq!(all[0].end, None);
        assert_eq!(all[1].location, Location::Remote);
    }

    #[test]
    fn delete_missing_row_is_not_found() {
        let conn = memory_db();
        let id = insert_working_time(&conn, &sample("2023-02-03", "08:10", None)).unwrap();
        delete_working_time(&conn, id).unwrap();
        assert!(load_working_time(&conn, id).unwrap().is_none());
        assert!(matches!(delete_working_time(&conn, id), Err(AppError::NotFound(_))));
    }
}
