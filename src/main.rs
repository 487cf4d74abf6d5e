use chrono::{Local, NaiveDateTime, Utc};
use discovr::config::env_loader::load_config;
use discovr::dates::{DateTextNormalizer, TimezoneAssumption};
use discovr::listing::{process_listings, DedupeContext, Event};
use discovr::scraper::{SelectorExtractor, VenueExtractor};
use serde::Serialize;
use std::env;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Serialize)]
struct EventLine<'a> {
    #[serde(flatten)]
    event: &'a Event,
    starts_at: Option<String>,
    ends_at: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let loki = discovr::tracing::setup_loki().await;

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let Some(path) = env::args().nth(1) else {
        error!("Usage: discovr <page.html>");
        return ExitCode::FAILURE;
    };

    let page = match tokio::fs::read_to_string(&path).await {
        Ok(page) => page,
        Err(err) => {
            error!("Failed reading '{}': {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let extractor = match SelectorExtractor::from_config(&config.venue) {
        Ok(extractor) => extractor,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let now: NaiveDateTime = match config.timezone {
        TimezoneAssumption::VenueLocal(tz) => {
            info!("Reading event times as {} wall-clock time", tz);
            Utc::now().with_timezone(&tz).naive_local()
        }
        TimezoneAssumption::Unspecified => {
            warn!("VENUE_TIMEZONE not set, event times stay zoneless and 'now' is this machine's local time");
            Local::now().naive_local()
        }
    };

    let listings = extractor.extract(&page);
    let normalizer = DateTextNormalizer::new(config.defaults.clone());
    let mut context = DedupeContext::new();

    info!(
        "Run {} normalizing {} listings from {}",
        context.run_id(),
        listings.len(),
        extractor.venue_name()
    );

    let report = process_listings(
        listings,
        now,
        &normalizer,
        config.failure_policy,
        &mut context,
    );

    for event in report.events.iter() {
        let zoned = match config.timezone {
            TimezoneAssumption::VenueLocal(tz) => event.occurring_at.localize(&tz),
            TimezoneAssumption::Unspecified => None,
        };

        let line = EventLine {
            event,
            starts_at: zoned.map(|(start, _)| start.to_rfc3339()),
            ends_at: zoned.map(|(_, end)| end.to_rfc3339()),
        };

        match serde_json::to_string(&line) {
            Ok(json) => println!("{}", json),
            Err(err) => error!("Failed serializing '{}': {}", event.title, err),
        }
    }

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        if let Err(err) = handle.await {
            warn!("Loki task ended badly: {}", err);
        }
    }

    ExitCode::SUCCESS
}
