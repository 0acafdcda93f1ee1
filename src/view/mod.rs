//! Text rendering of working-time snapshots.

use crate::models::WorkingTime;
use crate::utils::date::weekday_str;
use crate::utils::mins2readable;
use crate::utils::table::Table;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Presentation switches for the working-time view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub working_time_calendar: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            working_time_calendar: true,
        }
    }
}

pub struct WorkingTimeView;

impl WorkingTimeView {
    pub fn render(records: &[WorkingTime], ui: &UiState) -> String {
        if records.is_empty() {
            return "No working times recorded.\n".to_string();
        }

        if ui.working_time_calendar {
            Self::render_calendar(records)
        } else {
            Self::render_list(records)
        }
    }

    /// One table row per record, in snapshot order.
    fn render_list(records: &[WorkingTime]) -> String {
        let mut table = Table::new(["ID", "DATE", "IN", "OUT", "LUNCH", "POS", "WORKED", "NOTE"]);
        for wt in records {
            table.add_row(vec![
                wt.id.to_string(),
                wt.date_str(),
                wt.start_str(),
                wt.end_str(),
                wt.lunch.to_string(),
                wt.location.code().to_string(),
                wt.worked_minutes()
                    .map(|m| mins2readable(m, false, true))
                    .unwrap_or_else(|| "--:--".to_string()),
                wt.note.clone(),
            ]);
        }
        table.render()
    }

    /// Days in chronological order; each day lists its in/out times as
    /// calendar titles followed by the day's worked total.
    fn render_calendar(records: &[WorkingTime]) -> String {
        let mut days: BTreeMap<NaiveDate, Vec<&WorkingTime>> = BTreeMap::new();
        for wt in records {
            days.entry(wt.date).or_default().push(wt);
        }

        let mut out = String::new();
        for (day, entries) in days {
            out.push_str(&format!("=== {} ({}) ===\n", day.format("%Y-%m-%d"), weekday_str(&day)));

            let mut total = 0;
            for wt in &entries {
                let mut line = format!(
                    "  [{}] {} → {}  {}",
                    wt.id,
                    wt.start_str(),
                    wt.end_str(),
                    wt.location.label()
                );
                if wt.lunch > 0 {
                    line.push_str(&format!("  lunch {}m", wt.lunch));
                }
                if !wt.note.is_empty() {
                    line.push_str(&format!("  {}", wt.note));
                }
                out.push_str(&line);
                out.push('\n');
                total += wt.worked_minutes().unwrap_or(0);
            }

            out.push_str(&format!("  Worked: {}\n\n", mins2readable(total, false, false)));
        }
        out
    }
}
