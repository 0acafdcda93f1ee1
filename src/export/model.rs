use crate::models::WorkingTime;
use serde::Serialize;

/// Flat CSV row for one working time.
#[derive(Serialize, Clone, Debug)]
pub struct WorkingTimeExport {
    pub id: i64,
    pub date: String,
    pub start: String,
    pub end: String,
    pub lunch: i32,
    pub location: String,
    pub worked_minutes: Option<i64>,
    pub note: String,
}

impl From<&WorkingTime> for WorkingTimeExport {
    fn from(wt: &WorkingTime) -> Self {
        Self {
            id: wt.id,
            date: wt.date_str(),
            start: wt.start_str(),
            end: wt.end.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            lunch: wt.lunch,
            location: wt.location.code().to_string(),
            worked_minutes: wt.worked_minutes(),
            note: wt.note.clone(),
        }
    }
}
