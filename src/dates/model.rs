use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Start and end of an event as wall-clock time at the venue.
///
/// No timezone is attached: the instants are whatever the listing said,
/// read in the venue's own clock. Use [`ParsedInterval::localize`] once the
/// venue's timezone is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ParsedInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Both ends at the same instant
    pub fn instant(at: NaiveDateTime) -> Self {
        Self { start: at, end: at }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Attaches `tz` to both instants.
    ///
    /// Ambiguous wall-clock times (DST fall-back) resolve to the earliest
    /// mapping; times skipped by a DST jump yield `None`.
    pub fn localize(&self, tz: &Tz) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let start = tz.from_local_datetime(&self.start).earliest()?;
        let end = tz.from_local_datetime(&self.end).earliest()?;

        Some((start, end))
    }
}

/// Why a piece of date text couldn't be turned into a [`ParsedInterval`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no date text supplied")]
    EmptyInput,
    #[error("unrecognized date format: '{0}'")]
    UnrecognizedFormat(String),
    #[error("invalid date components: {0}")]
    InvalidComponents(String),
}

/// Longest duration a [`DefaultPolicy`] may apply, one week
pub const MAX_DURATION_MINUTES: i64 = 7 * 24 * 60;

/// Fallback clock times and durations for text that under-specifies the time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPolicy {
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub evening_start: NaiveTime,
    pub evening_end: NaiveTime,
    /// Applied when only a start time is known
    pub duration_minutes: i64,
    /// Applied to instants found by the generic parse
    pub fallback_duration_minutes: i64,
}

impl DefaultPolicy {
    pub fn duration(&self) -> Result<Duration, ParseFailure> {
        policy_minutes(self.duration_minutes)
    }

    pub fn fallback_duration(&self) -> Result<Duration, ParseFailure> {
        policy_minutes(self.fallback_duration_minutes)
    }

    pub fn from_preset(preset: PolicyPreset) -> Self {
        match preset {
            PolicyPreset::General => Self::default(),
            PolicyPreset::Museum => Self {
                day_start: hm(10, 0),
                day_end: hm(21, 0),
                evening_start: hm(19, 0),
                evening_end: hm(21, 0),
                duration_minutes: 180,
                fallback_duration_minutes: 120,
            },
            PolicyPreset::Nightlife => Self {
                day_start: hm(20, 0),
                day_end: hm(23, 0),
                evening_start: hm(21, 0),
                evening_end: hm(23, 59),
                duration_minutes: 180,
                fallback_duration_minutes: 180,
            },
            PolicyPreset::Bookstore => Self {
                day_start: hm(18, 30),
                day_end: hm(20, 0),
                evening_start: hm(18, 30),
                evening_end: hm(20, 0),
                duration_minutes: 90,
                fallback_duration_minutes: 90,
            },
        }
    }
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            day_start: hm(9, 0),
            day_end: hm(17, 0),
            evening_start: hm(19, 0),
            evening_end: hm(21, 0),
            duration_minutes: 120,
            fallback_duration_minutes: 120,
        }
    }
}

/// Venue categories with their usual opening hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PolicyPreset {
    General,
    Museum,
    Nightlife,
    Bookstore,
}

/// How parsed instants relate to real time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimezoneAssumption {
    /// Instants are venue wall-clock time and the venue's zone is unknown
    Unspecified,
    VenueLocal(Tz),
}

fn policy_minutes(minutes: i64) -> Result<Duration, ParseFailure> {
    Duration::try_minutes(minutes)
        .filter(|_| (0..=MAX_DURATION_MINUTES).contains(&minutes))
        .ok_or_else(|| {
            ParseFailure::InvalidComponents(format!(
                "duration of {} minutes is outside 0..={}",
                minutes, MAX_DURATION_MINUTES
            ))
        })
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use std::str::FromStr;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test_log::test]
    fn presets_should_parse_case_insensitively() {
        assert_eq!(PolicyPreset::from_str("Museum").unwrap(), PolicyPreset::Museum);
        assert_eq!(
            PolicyPreset::from_str("nightlife").unwrap(),
            PolicyPreset::Nightlife
        );
        assert!(PolicyPreset::from_str("zoo").is_err());
    }

    #[test_log::test]
    fn bookstore_preset_should_run_ninety_minutes_from_half_past_six() {
        let policy = DefaultPolicy::from_preset(PolicyPreset::Bookstore);

        assert_eq!(policy.day_start.hour(), 18);
        assert_eq!(policy.day_start.minute(), 30);
        assert_eq!(policy.duration(), Ok(Duration::minutes(90)));
    }

    #[test_log::test]
    fn when_durations_are_negative_or_huge_should_fail_with_invalid_components() {
        let backwards = DefaultPolicy {
            duration_minutes: -60,
            ..DefaultPolicy::default()
        };
        let endless = DefaultPolicy {
            fallback_duration_minutes: i64::MAX,
            ..DefaultPolicy::default()
        };

        assert!(matches!(
            backwards.duration(),
            Err(ParseFailure::InvalidComponents(_))
        ));
        assert!(matches!(
            endless.fallback_duration(),
            Err(ParseFailure::InvalidComponents(_))
        ));
        assert_eq!(endless.duration(), Ok(Duration::minutes(120)));
    }

    #[test_log::test]
    fn when_localizing_should_keep_wall_clock_time() {
        let interval = ParsedInterval::new(at(2025, 7, 16, 20, 0), at(2025, 7, 16, 22, 0));
        let tz: Tz = "America/Toronto".parse().unwrap();

        let (start, end) = interval.localize(&tz).unwrap();

        assert_eq!(start.naive_local(), interval.start);
        assert_eq!(end.naive_local(), interval.end);
        assert_eq!(start.to_rfc3339(), "2025-07-16T20:00:00-04:00");
    }

    #[test_log::test]
    fn when_localizing_a_time_skipped_by_dst_should_yield_none() {
        let interval = ParsedInterval::instant(at(2025, 3, 9, 2, 30));
        let tz: Tz = "America/Vancouver".parse().unwrap();

        assert!(interval.localize(&tz).is_none());
    }
}
