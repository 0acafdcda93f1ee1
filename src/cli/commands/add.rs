use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, NewWorkingTime};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Location;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::{parse_optional_time, parse_time};

/// Record a working time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        lunch,
        pos,
        note,
    } = cmd
    {
        let d = date::parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        let location = match pos {
            Some(code) => Location::from_code(code).ok_or_else(|| {
                AppError::InvalidPosition(format!(
                    "Invalid location code '{}'. Use O, R, H, C, M or \
                     office, remote, holiday, customer, mixed",
                    code
                ))
            })?,
            None => cfg.default_location(),
        };

        let start_parsed =
            parse_time(start).ok_or_else(|| AppError::InvalidTime(start.to_string()))?;
        let end_parsed = parse_optional_time(end.as_ref())?;

        let mut pool = DbPool::new(&cfg.database)?;

        let id = AddLogic::apply(
            &mut pool,
            NewWorkingTime {
                date: d,
                start: start_parsed,
                end: end_parsed,
                lunch: *lunch,
                location,
                note: note.clone().unwrap_or_default(),
            },
        )?;

        success(format!("Working time #{} added for {}", id, d));
    }

    Ok(())
}
