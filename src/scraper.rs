use crate::config::model::VenueConfig;
use crate::listing::ScrapedListing;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Pulls raw listings out of one venue's page
pub trait VenueExtractor {
    fn venue_name(&self) -> &str;

    fn extract(&self, page: &str) -> Vec<ScrapedListing>;
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid {field} selector '{selector}': {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },
}

/// Extractor driven by CSS selectors, one listing per `listing` match
pub struct SelectorExtractor {
    venue_name: String,
    listing: Selector,
    title: Selector,
    date: Selector,
    time: Option<Selector>,
    price: Option<Selector>,
    image: Option<Selector>,
    link: Option<Selector>,
    description: Option<Selector>,
}

impl SelectorExtractor {
    pub fn from_config(config: &VenueConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            venue_name: config.name.to_string(),
            listing: parse_selector("listing", &config.listing_selector)?,
            title: parse_selector("title", &config.title_selector)?,
            date: parse_selector("date", &config.date_selector)?,
            time: parse_optional_selector("time", config.time_selector.as_deref())?,
            price: parse_optional_selector("price", config.price_selector.as_deref())?,
            image: parse_optional_selector("image", config.image_selector.as_deref())?,
            link: parse_optional_selector("link", config.link_selector.as_deref())?,
            description: parse_optional_selector(
                "description",
                config.description_selector.as_deref(),
            )?,
        })
    }
}

impl VenueExtractor for SelectorExtractor {
    fn venue_name(&self) -> &str {
        &self.venue_name
    }

    #[instrument(skip_all, fields(venue = %self.venue_name))]
    fn extract(&self, page: &str) -> Vec<ScrapedListing> {
        let document = Html::parse_document(page);

        let listings = document
            .select(&self.listing)
            .filter_map(|element| {
                let title = first_text(element, &self.title).filter(|title| !title.is_empty());

                if title.is_none() {
                    debug!("Skipping listing without a title");
                }

                title.map(|title| ScrapedListing {
                    title,
                    venue: self.venue_name.to_string(),
                    link: optional_attr(element, self.link.as_ref(), "href"),
                    date_text: first_text(element, &self.date).unwrap_or_default(),
                    time_text: optional_text(element, self.time.as_ref()),
                    price_text: optional_text(element, self.price.as_ref()),
                    image_url: optional_attr(element, self.image.as_ref(), "src"),
                    description: optional_text(element, self.description.as_ref()),
                })
            })
            .collect::<Vec<ScrapedListing>>();

        info!("Extracted {} listings", listings.len());

        listings
    }
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::InvalidSelector {
        field,
        selector: selector.to_string(),
        reason: format!("{:?}", err),
    })
}

fn parse_optional_selector(
    field: &'static str,
    selector: Option<&str>,
) -> Result<Option<Selector>, ExtractError> {
    selector.map(|s| parse_selector(field, s)).transpose()
}

fn first_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().flat_map(str::split_whitespace).join(" "))
}

fn optional_text(element: ElementRef, selector: Option<&Selector>) -> Option<String> {
    selector
        .and_then(|selector| first_text(element, selector))
        .filter(|text| !text.is_empty())
}

fn optional_attr(element: ElementRef, selector: Option<&Selector>, attr: &str) -> Option<String> {
    selector
        .and_then(|selector| element.select(selector).next())
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}
