use super::EntityService;
use crate::errors::LoadError;
use crate::models::Entity;
use std::time::Instant;

/// Gate run before a view renders: loads the collection if needed and
/// waits for it.
pub struct Resolver<'a, E: Entity> {
    service: &'a EntityService<E>,
}

impl<'a, E: Entity> Resolver<'a, E> {
    pub fn new(service: &'a EntityService<E>) -> Self {
        Self { service }
    }

    /// `Ok(true)` once the collection is loaded; the load error otherwise.
    pub async fn resolve(&self) -> Result<bool, LoadError> {
        let started = Instant::now();
        let result = self.service.ensure_loaded().await;

        match &result {
            Ok(_) => tracing::debug!(
                collection = self.service.entity_name(),
                origin = self.service.origin(),
                records = self.service.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "resolved"
            ),
            Err(e) => tracing::warn!(
                collection = self.service.entity_name(),
                origin = self.service.origin(),
                error = %e,
                "resolve failed"
            ),
        }
        result
    }
}
