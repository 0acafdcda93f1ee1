use super::DataSource;
use crate::db::pool::DbPool;
use crate::db::queries::load_all_working_times;
use crate::errors::FetchError;
use crate::models::WorkingTime;
use async_trait::async_trait;

/// Reads working times from the CLI's SQLite database.
///
/// The database is opened read-only for every fetch, on a blocking
/// worker thread, so a missing file is reported instead of created.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: String,
}

impl SqliteSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource<WorkingTime> for SqliteSource {
    async fn fetch_all(&self) -> Result<Vec<WorkingTime>, FetchError> {
        let path = self.path.clone();
        let rows = tokio::task::spawn_blocking(move || -> Result<Vec<WorkingTime>, FetchError> {
            let pool = DbPool::open_read_only(&path)?;
            Ok(load_all_working_times(&pool.conn)?)
        })
        .await
        .map_err(|e| FetchError::Panicked(e.to_string()))??;

        tracing::debug!(path = %self.path, count = rows.len(), "read working times from sqlite");
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}
