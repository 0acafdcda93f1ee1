/// A record that can live in a keyed collection.
///
/// The key must be unique inside one collection; a later record with the
/// same key replaces the earlier one.
pub trait Entity: Clone + Send + Sync + 'static {
    fn key(&self) -> String;
}
