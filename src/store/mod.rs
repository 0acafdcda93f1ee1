pub mod collection;
pub mod gate;

pub use collection::CollectionState;
pub use gate::{DEFAULT_LOAD_TIMEOUT, LoadGate, LoadPhase};
