pub mod entity;
pub mod location;
pub mod working_time;

pub use entity::Entity;
pub use location::Location;
pub use working_time::WorkingTime;
