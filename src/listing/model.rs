use super::dedupe::event_id;
use super::price::Price;
use crate::dates::ParsedInterval;
use serde::Serialize;
use uuid::Uuid;

/// One event entry as pulled from a venue page, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedListing {
    pub title: String,
    pub venue: String,
    pub link: Option<String>,
    pub date_text: String,
    pub time_text: Option<String>,
    pub price_text: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub venue: String,
    pub link: Option<String>,
    pub occurring_at: ParsedInterval,
    pub details: EventDetails,
}

impl Event {
    pub fn new(
        title: String,
        venue: String,
        link: Option<String>,
        occurring_at: ParsedInterval,
        details: EventDetails,
    ) -> Self {
        Self {
            id: event_id(&title, &venue, &occurring_at),
            title,
            venue,
            link,
            occurring_at,
            details,
        }
    }

    pub fn from_listing(listing: ScrapedListing, occurring_at: ParsedInterval) -> Self {
        let price = listing
            .price_text
            .as_deref()
            .map(Price::from_text)
            .unwrap_or_default();

        Self::new(
            listing.title,
            listing.venue,
            listing.link,
            occurring_at,
            EventDetails::new(listing.description, listing.image_url, price),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetails {
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Price,
}

impl EventDetails {
    pub fn new(description: Option<String>, image_url: Option<String>, price: Price) -> Self {
        Self {
            description,
            image_url,
            price,
        }
    }
}
