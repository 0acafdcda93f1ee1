pub mod add;
pub mod config;
pub mod del;
pub mod export;
pub mod loader;
pub mod log;
