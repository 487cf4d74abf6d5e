//! Free-text event date parsing.
//!
//! [`normalizer::normalize`] runs an ordered cascade of patterns over
//! scraped date text, cheapest first, and falls back to a generic parse.

pub mod fallback;
pub mod model;
pub mod normalizer;
pub mod patterns;
pub mod season;
pub mod time_of_day;

pub use model::{
    DefaultPolicy, ParseFailure, ParsedInterval, PolicyPreset, TimezoneAssumption, MAX_DURATION_MINUTES,
};
pub use normalizer::{normalize, DateTextNormalizer};
