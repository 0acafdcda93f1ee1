use super::DataSource;
use crate::errors::FetchError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::PathBuf;

/// Reads a JSON array of records, e.g. a file written by `export --format json`.
#[derive(Debug, Clone)]
pub struct JsonFileSource<E> {
    path: PathBuf,
    _records: PhantomData<fn() -> E>,
}

impl<E> JsonFileSource<E> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }
}

#[async_trait]
impl<E> DataSource<E> for JsonFileSource<E>
where
    E: DeserializeOwned + Send + 'static,
{
    async fn fetch_all(&self) -> Result<Vec<E>, FetchError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {e}", self.path.display())))?;
        let records: Vec<E> = serde_json::from_str(&raw)?;
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
