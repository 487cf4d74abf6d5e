use super::dedupe::DedupeContext;
use super::model::{Event, ScrapedListing};
use crate::dates::{DateTextNormalizer, ParseFailure, ParsedInterval};
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

/// What to do with a listing whose date can't be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum FailurePolicy {
    #[default]
    Skip,
    /// Keep the listing with `now` as both start and end
    UseNow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFailure {
    pub title: String,
    pub date_text: String,
    pub reason: ParseFailure,
}

#[derive(Debug, Default)]
pub struct ProcessReport {
    pub events: Vec<Event>,
    pub failures: Vec<ListingFailure>,
    pub duplicates: usize,
}

/// Normalizes and dedupes one run's listings. A listing that fails never
/// stops the rest of the batch.
#[tracing::instrument(skip_all, fields(run_id = %context.run_id(), listings = listings.len()))]
pub fn process_listings(
    listings: Vec<ScrapedListing>,
    now: NaiveDateTime,
    normalizer: &DateTextNormalizer,
    policy: FailurePolicy,
    context: &mut DedupeContext,
) -> ProcessReport {
    let mut report = ProcessReport::default();

    for listing in listings {
        if let Some(link) = &listing.link {
            if context.has_seen_link(link) {
                debug!("Skipping '{}', link already seen", listing.title);
                report.duplicates += 1;
                continue;
            }
        }

        let occurring_at = match normalizer.normalize(
            &listing.date_text,
            listing.time_text.as_deref(),
            now,
        ) {
            Ok(interval) => interval,
            Err(reason) => {
                warn!(
                    "Couldn't parse date of '{}' ('{}'): {}",
                    listing.title, listing.date_text, reason
                );

                report.failures.push(ListingFailure {
                    title: listing.title.to_string(),
                    date_text: listing.date_text.to_string(),
                    reason,
                });

                match policy {
                    FailurePolicy::Skip => continue,
                    FailurePolicy::UseNow => ParsedInterval::instant(now),
                }
            }
        };

        let event = Event::from_listing(listing, occurring_at);

        if context.admit(&event) {
            report.events.push(event);
        } else {
            report.duplicates += 1;
        }
    }

    info!(
        "Kept {} events ({} unparseable, {} duplicates)",
        report.events.len(),
        report.failures.len(),
        report.duplicates
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test_log::test]
    fn failure_policy_should_parse_from_config_values() {
        assert_eq!(FailurePolicy::from_str("skip").unwrap(), FailurePolicy::Skip);
        assert_eq!(FailurePolicy::from_str("use-now").unwrap(), FailurePolicy::UseNow);
    }

    #[test_log::test]
    fn when_policy_is_use_now_should_keep_the_listing_at_now() {
        let now = NaiveDate::from_ymd_opt(2025, 7, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let listing = ScrapedListing {
            title: "Mystery show".to_string(),
            venue: "Penthouse".to_string(),
            date_text: "coming soon".to_string(),
            ..Default::default()
        };

        let report = process_listings(
            vec![listing],
            now,
            &DateTextNormalizer::default(),
            FailurePolicy::UseNow,
            &mut DedupeContext::new(),
        );

        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].occurring_at, ParsedInterval::instant(now));
        assert_eq!(report.failures.len(), 1);
    }
}
