pub mod config;
pub mod dates;
pub mod listing;
pub mod scraper;
pub mod tracing;
