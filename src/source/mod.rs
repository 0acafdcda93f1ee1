//! Data sources: the backend side of a collection load.
//!
//! A source answers one question, "give me every record of this entity",
//! and knows nothing about caching. The load gate decides when to ask.

mod json;
mod sqlite;

pub use json::JsonFileSource;
pub use sqlite::SqliteSource;

use crate::errors::FetchError;
use async_trait::async_trait;

#[async_trait]
pub trait DataSource<E>: Send + Sync {
    /// Fetches the full, authoritative record set.
    async fn fetch_all(&self) -> Result<Vec<E>, FetchError>;

    /// Short human-readable origin, used in log lines.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}
