//! Entity services and the resolvers that gate views on them.

mod entity_service;
mod resolver;

pub use entity_service::EntityService;
pub use resolver::Resolver;

use crate::models::WorkingTime;

/// Entity name under which working times are cached.
pub const WORKING_TIME: &str = "WorkingTime";

pub type WorkingTimeService = EntityService<WorkingTime>;
