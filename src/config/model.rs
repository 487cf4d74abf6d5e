use crate::dates::{DefaultPolicy, TimezoneAssumption};
use crate::listing::FailurePolicy;

#[derive(Debug)]
pub struct Config {
    pub venue: VenueConfig,
    pub defaults: DefaultPolicy,
    pub failure_policy: FailurePolicy,
    pub timezone: TimezoneAssumption,
}

/// CSS selectors locating each listing field on a venue page
#[derive(Debug, Clone)]
pub struct VenueConfig {
    pub name: String,
    pub listing_selector: String,
    pub title_selector: String,
    pub date_selector: String,
    pub time_selector: Option<String>,
    pub price_selector: Option<String>,
    pub image_selector: Option<String>,
    pub link_selector: Option<String>,
    pub description_selector: Option<String>,
}
