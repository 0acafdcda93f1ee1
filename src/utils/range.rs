//! Date filters for `--period` / `--range`.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// Inclusive date interval.
///
/// Accepted forms: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of the same
/// form joined by `:` (e.g. `2025-01:2025-03`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, d: &NaiveDate) -> bool {
        self.first <= *d && *d <= self.last
    }
}

fn invalid(raw: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("'{raw}': {why}"))
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    }?;
    next.pred_opt().map(|d| d.day())
}

/// First and last day covered by a single period token.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(p, "invalid year"))?;
            let first =
                NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(p, "invalid year"))?;
            let last =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(p, "invalid year"))?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid(p, "invalid month"))?;
            let last_day = month_last_day(first.year(), first.month())
                .ok_or_else(|| invalid(p, "invalid month"))?;
            let last = first.with_day(last_day).ok_or_else(|| invalid(p, "invalid month"))?;
            Ok((first, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| invalid(p, "invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(p, "expected YYYY, YYYY-MM or YYYY-MM-DD")),
    }
}

impl FromStr for DateRange {
    type Err = AppError;

    fn from_str(r: &str) -> AppResult<Self> {
        let (first, last) = match r.split_once(':') {
            Some((start, end)) => {
                let (start, end) = (start.trim(), end.trim());
                if start.len() != end.len() {
                    return Err(invalid(r, "start and end must have the same format"));
                }
                (period_bounds(start)?.0, period_bounds(end)?.1)
            }
            None => period_bounds(r.trim())?,
        };

        if first > last {
            return Err(invalid(r, "start is after end"));
        }
        Ok(Self { first, last })
    }
}
