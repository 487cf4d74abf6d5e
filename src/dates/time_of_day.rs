use super::model::{ParseFailure, ParsedInterval};
use super::patterns::{TIME, TIME_RANGE};
use chrono::{Duration, NaiveDate, NaiveTime};
use regex::Captures;
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn opposite(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }
}

/// 12-hour clock to 24-hour clock.
///
/// Only `PM` before noon and `12 AM` change; everything else passes through.
pub fn to_24_hour(hour: u32, meridiem: Meridiem) -> u32 {
    match meridiem {
        Meridiem::Pm if hour < 12 => hour + 12,
        Meridiem::Am if hour == 12 => 0,
        _ => hour,
    }
}

/// A start clock time and, when the text gave one, an end clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

impl TimeSpan {
    pub fn starting_at(start: NaiveTime) -> Self {
        Self { start, end: None }
    }

    /// Places the span on `date`, rolling the end into the next day when it
    /// reads earlier than the start (`11pm - 2am`)
    pub fn on(&self, date: NaiveDate, duration: Duration) -> Result<ParsedInterval, ParseFailure> {
        self.between(date, date, duration)
    }

    /// Start on `first`, end on `last`. An end clock time earlier than the
    /// start clock time runs past midnight, so it lands on the day after `last`.
    pub fn between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        duration: Duration,
    ) -> Result<ParsedInterval, ParseFailure> {
        let start = first.and_time(self.start);

        let end = match self.end {
            Some(end_time) if end_time < self.start => last
                .and_time(end_time)
                .checked_add_signed(Duration::days(1)),
            Some(end_time) => Some(last.and_time(end_time)),
            None => last.and_time(self.start).checked_add_signed(duration),
        };

        match end.filter(|end| *end >= start) {
            Some(end) => Ok(ParsedInterval::new(start, end)),
            None => Err(ParseFailure::InvalidComponents(format!(
                "no end at or after {}",
                start
            ))),
        }
    }
}

/// Reads a separately scraped time text: a single time or a time range.
///
/// Text with no time in it at all (`"TBA"`) is `Ok(None)`.
pub fn parse_time_text(text: &str) -> Result<Option<TimeSpan>, ParseFailure> {
    if let Some((span, _)) = find_time_range(text)? {
        return Ok(Some(span));
    }

    Ok(find_time(text)?.map(TimeSpan::starting_at))
}

/// First time range in `text`, with the byte offset it starts at
pub fn find_time_range(text: &str) -> Result<Option<(TimeSpan, usize)>, ParseFailure> {
    for caps in TIME_RANGE.captures_iter(text) {
        let start_meridiem = meridiem(&caps, "sa");
        let end_meridiem = meridiem(&caps, "ea");
        let has_minutes = caps.name("sm").is_some() && caps.name("em").is_some();

        // bare "5 - 31" is a day range, not a time range
        if end_meridiem.is_none() && (start_meridiem.is_some() || !has_minutes) {
            continue;
        }

        let end = clock_time(&caps["eh"], caps.name("em").map(|m| m.as_str()), end_meridiem)?;
        let start = match (start_meridiem, end_meridiem) {
            (None, Some(inherited)) => inherit_meridiem(&caps, inherited, end)?,
            _ => clock_time(&caps["sh"], caps.name("sm").map(|m| m.as_str()), start_meridiem)?,
        };

        let offset = caps.get(0).map(|m| m.start()).unwrap_or_default();
        trace!("Found time range {} - {} at {}", start, end, offset);

        return Ok(Some((
            TimeSpan {
                start,
                end: Some(end),
            },
            offset,
        )));
    }

    Ok(None)
}

/// First single time in `text`. Bare numbers don't count: a time needs
/// minutes or a meridiem.
pub fn find_time(text: &str) -> Result<Option<NaiveTime>, ParseFailure> {
    for caps in TIME.captures_iter(text) {
        let minutes = caps.name("m").map(|m| m.as_str());
        let meridiem = meridiem(&caps, "a");

        if minutes.is_none() && meridiem.is_none() {
            continue;
        }

        return clock_time(&caps["h"], minutes, meridiem).map(Some);
    }

    Ok(None)
}

/// "8 - 10 PM": the start takes whichever meridiem gives the shorter span
fn inherit_meridiem(
    caps: &Captures,
    inherited: Meridiem,
    end: NaiveTime,
) -> Result<NaiveTime, ParseFailure> {
    let hour = &caps["sh"];
    let minutes = caps.name("sm").map(|m| m.as_str());

    if parse_number(hour)? > 12 {
        return clock_time(hour, minutes, None);
    }

    let same = clock_time(hour, minutes, Some(inherited))?;
    let opposite = clock_time(hour, minutes, Some(inherited.opposite()))?;

    if forward_gap(same, end) <= forward_gap(opposite, end) {
        Ok(same)
    } else {
        Ok(opposite)
    }
}

fn forward_gap(start: NaiveTime, end: NaiveTime) -> Duration {
    let gap = end - start;
    if gap < Duration::zero() {
        gap + Duration::days(1)
    } else {
        gap
    }
}

fn meridiem(caps: &Captures, group: &str) -> Option<Meridiem> {
    caps.name(group)
        .and_then(|m| Meridiem::from_str(m.as_str()).ok())
}

pub(crate) fn clock_time(
    hour: &str,
    minutes: Option<&str>,
    meridiem: Option<Meridiem>,
) -> Result<NaiveTime, ParseFailure> {
    let hour = parse_number(hour)?;
    let minute = minutes.map(parse_number).transpose()?.unwrap_or(0);

    let hour = match meridiem {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return Err(ParseFailure::InvalidComponents(format!(
                    "hour {} is not on a 12-hour clock",
                    hour
                )));
            }
            to_24_hour(hour, meridiem)
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        ParseFailure::InvalidComponents(format!("{}:{:02} is not a clock time", hour, minute))
    })
}

pub(crate) fn parse_number(digits: &str) -> Result<u32, ParseFailure> {
    digits
        .parse()
        .map_err(|_| ParseFailure::InvalidComponents(format!("'{}' is not a number", digits)))
}
