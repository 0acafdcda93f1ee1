use crate::errors::LoadError;
use crate::models::Entity;
use crate::source::DataSource;
use crate::store::{LoadGate, LoadPhase};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Named entity collection backed by a data source.
///
/// Owns the collection state through its [`LoadGate`]; pass the service
/// (or a clone) to whoever needs the records instead of reaching for a
/// global.
#[derive(Debug)]
pub struct EntityService<E: Entity> {
    gate: LoadGate<E>,
    origin: String,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            origin: self.origin.clone(),
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(
        entity_name: impl Into<String>,
        source: Arc<dyn DataSource<E>>,
        timeout: Duration,
    ) -> Self {
        let origin = source.describe();
        Self {
            gate: LoadGate::new(entity_name, source, timeout),
            origin,
        }
    }

    pub fn entity_name(&self) -> &str {
        self.gate.name()
    }

    /// Where the records come from, e.g. `sqlite:/path/db.sqlite`.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub async fn ensure_loaded(&self) -> Result<bool, LoadError> {
        self.gate.ensure_loaded().await
    }

    pub fn get_all(&self) -> Vec<E> {
        self.gate.get_all()
    }

    pub fn get_by_key(&self, key: &str) -> Option<E> {
        self.gate.get_by_key(key)
    }

    pub fn len(&self) -> usize {
        self.gate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gate.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.gate.is_loaded()
    }

    pub fn phase(&self) -> LoadPhase {
        self.gate.phase()
    }

    /// `loaded$`: flips to `true` once the first load succeeds.
    pub fn loaded(&self) -> watch::Receiver<bool> {
        self.gate.subscribe()
    }

    pub fn cancel(&self) -> bool {
        self.gate.cancel()
    }

    pub fn fetch_count(&self) -> u64 {
        self.gate.fetch_count()
    }
}
