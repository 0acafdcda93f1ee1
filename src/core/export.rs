use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ensure_writable, export_csv, export_json};
use crate::models::WorkingTime;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use crate::utils::range::DateRange;

/// High-level export logic: filter a loaded snapshot and write it out.
pub struct ExportLogic;

impl ExportLogic {
    /// Writes `records` (optionally restricted to `range`) to `file`.
    /// Returns how many records were written.
    pub fn export(
        records: &[WorkingTime],
        format: ExportFormat,
        file: &str,
        range: Option<&DateRange>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);
        if path.is_dir() {
            return Err(AppError::Export(format!("{} is a directory", path.display())));
        }

        ensure_writable(&path, force)?;

        let selected: Vec<WorkingTime> = records
            .iter()
            .filter(|wt| range.is_none_or(|r| r.contains(&wt.date)))
            .cloned()
            .collect();

        if selected.is_empty() {
            warning("No working times found for the selected range.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&selected, &path)?,
            ExportFormat::Json => export_json(&selected, &path)?,
        }

        Ok(selected.len())
    }

    /// Audit row for a finished export; only written when the database exists.
    pub fn log_export(database: &str, format: ExportFormat, file: &str, count: usize) {
        if !std::path::Path::new(database).exists() {
            return;
        }
        match DbPool::new(database) {
            Ok(pool) => ttlog_or_warn(
                &pool.conn,
                "export",
                format.as_str(),
                &format!("{count} record(s) → {file}"),
            ),
            Err(e) => tracing::warn!(error = %e, "cannot open database for audit log"),
        }
    }
}
