pub mod dedupe;
pub mod model;
pub mod price;
pub mod processor;

pub use dedupe::DedupeContext;
pub use model::{Event, EventDetails, ScrapedListing};
pub use processor::{process_listings, FailurePolicy, ProcessReport};
