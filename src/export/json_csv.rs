use crate::errors::{AppError, AppResult};
use crate::export::{WorkingTimeExport, notify_export_success};
use crate::models::WorkingTime;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed. The output can be read back by the
/// JSON data source.
pub(crate) fn export_json(records: &[WorkingTime], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;

    notify_export_success("JSON", records.len(), path);
    Ok(())
}

/// Export CSV (header derived from the row struct by serde).
pub(crate) fn export_csv(records: &[WorkingTime], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for wt in records {
        wtr.serialize(WorkingTimeExport::from(wt))
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", records.len(), path);
    Ok(())
}
