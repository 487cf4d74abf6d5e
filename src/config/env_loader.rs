use crate::config::model::{Config, VenueConfig};
use crate::dates::{DefaultPolicy, PolicyPreset, TimezoneAssumption, MAX_DURATION_MINUTES};
use crate::listing::FailurePolicy;
use chrono::NaiveTime;
use chrono_tz::Tz;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set.")]
    Missing(&'static str),
    #[error("Invalid config '{name}'. Expected {expected}.")]
    Invalid {
        name: &'static str,
        expected: &'static str,
    },
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

/// Builds the config from any variable lookup, the environment in production
pub fn load_config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let preset = load_parsed_config(
        &lookup,
        "DEFAULT_POLICY",
        PolicyPreset::General,
        "one of general, museum, nightlife, bookstore",
    )?;
    let preset = DefaultPolicy::from_preset(preset);

    let defaults = DefaultPolicy {
        day_start: load_time_config(&lookup, "DAY_START", preset.day_start)?,
        day_end: load_time_config(&lookup, "DAY_END", preset.day_end)?,
        evening_start: load_time_config(&lookup, "EVENING_START", preset.evening_start)?,
        evening_end: load_time_config(&lookup, "EVENING_END", preset.evening_end)?,
        duration_minutes: load_duration_config(
            &lookup,
            "DEFAULT_DURATION_MINUTES",
            preset.duration_minutes,
        )?,
        fallback_duration_minutes: load_duration_config(
            &lookup,
            "FALLBACK_DURATION_MINUTES",
            preset.fallback_duration_minutes,
        )?,
    };

    let failure_policy = load_parsed_config(
        &lookup,
        "ON_PARSE_FAILURE",
        FailurePolicy::Skip,
        "either 'skip' or 'use-now'",
    )?;

    let timezone = match lookup("VENUE_TIMEZONE") {
        Some(name) => TimezoneAssumption::VenueLocal(Tz::from_str(&name).map_err(|_| {
            ConfigError::Invalid {
                name: "VENUE_TIMEZONE",
                expected: "an IANA timezone name such as 'America/Toronto'",
            }
        })?),
        None => TimezoneAssumption::Unspecified,
    };

    Ok(Config {
        venue: load_venue_config(&lookup)?,
        defaults,
        failure_policy,
        timezone,
    })
}

fn load_venue_config<F>(lookup: &F) -> Result<VenueConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(VenueConfig {
        name: load_required_config(lookup, "VENUE_NAME")?,
        listing_selector: load_required_config(lookup, "LISTING_SELECTOR")?,
        title_selector: load_required_config(lookup, "TITLE_SELECTOR")?,
        date_selector: load_required_config(lookup, "DATE_SELECTOR")?,
        time_selector: lookup("TIME_SELECTOR"),
        price_selector: lookup("PRICE_SELECTOR"),
        image_selector: lookup("IMAGE_SELECTOR"),
        link_selector: lookup("LINK_SELECTOR"),
        description_selector: lookup("DESCRIPTION_SELECTOR"),
    })
}

fn load_required_config<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn load_time_config<F>(lookup: &F, name: &'static str, default: NaiveTime) -> Result<NaiveTime, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
            ConfigError::Invalid {
                name,
                expected: "a 24-hour time like '19:30'",
            }
        }),
        None => Ok(default),
    }
}

/// Minutes between 0 and one week
fn load_duration_config<F>(lookup: &F, name: &'static str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const EXPECTED: &str = "a whole number of minutes from 0 to 10080";

    let minutes = load_parsed_config(lookup, name, default, EXPECTED)?;

    if (0..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(ConfigError::Invalid {
            name,
            expected: EXPECTED,
        })
    }
}

fn load_parsed_config<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, expected }),
        None => Ok(default),
    }
}
