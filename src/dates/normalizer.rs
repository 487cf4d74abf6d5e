use super::fallback::{parse_generic, GenericDate};
use super::model::{DefaultPolicy, ParseFailure, ParsedInterval};
use super::patterns::{
    month_number, next_weekday_after, DATE_RANGE, DAY_MONTH, DOTTED_MERIDIEM, ISO_DATE,
    MONTH_DAY, NUMERIC_DATE, ORDINAL_SUFFIX, RELATIVE_DAY, SEASON, TRAILING_CONNECTOR, WEEKDAY,
    WHITESPACE,
};
use super::season::Season;
use super::time_of_day::{self, clock_time, parse_number, TimeSpan};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use regex::Captures;
use std::str::FromStr;
use tracing::{debug, trace};

type StepResult = Result<Option<ParsedInterval>, ParseFailure>;
type Step = fn(&Input) -> StepResult;

/// Tried in order, first match wins
const CASCADE: [(&str, Step); 10] = [
    ("time range", time_range),
    ("date range", date_range),
    ("date and time", date_and_time),
    ("date", date_only),
    ("weekday", weekday),
    ("relative day", relative_day),
    ("season", season),
    ("iso date", iso_date),
    ("numeric date", numeric_date),
    ("generic", generic),
];

/// Turns scraped date text into a [`ParsedInterval`] using one venue
/// category's [`DefaultPolicy`]
#[derive(Debug, Clone, Default)]
pub struct DateTextNormalizer {
    defaults: DefaultPolicy,
}

impl DateTextNormalizer {
    pub fn new(defaults: DefaultPolicy) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &DefaultPolicy {
        &self.defaults
    }

    pub fn normalize(
        &self,
        date_text: &str,
        time_text: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<ParsedInterval, ParseFailure> {
        normalize(date_text, time_text, now, &self.defaults)
    }
}

/// Normalizes free-form date text (and an optional separate time text).
///
/// `now` only feeds year inference and relative references; the result is
/// a pure function of the arguments.
pub fn normalize(
    date_text: &str,
    time_text: Option<&str>,
    now: NaiveDateTime,
    defaults: &DefaultPolicy,
) -> Result<ParsedInterval, ParseFailure> {
    let text = clean(date_text);

    if text.is_empty() {
        return Err(ParseFailure::EmptyInput);
    }

    let time_span = match time_text {
        Some(time_text) => time_of_day::parse_time_text(&clean(time_text))?,
        None => None,
    };

    let input = Input {
        text: &text,
        now,
        defaults,
        duration: defaults.duration()?,
        fallback_duration: defaults.fallback_duration()?,
        time_span,
    };

    for (name, step) in CASCADE {
        if let Some(interval) = step(&input)? {
            trace!(step = name, "Parsed '{}' as {} -> {}", text, interval.start, interval.end);
            return Ok(interval);
        }
    }

    debug!("No date pattern matched '{}'", text);

    Err(ParseFailure::UnrecognizedFormat(text))
}

/// Dashes to `-`, `19th` to `19`, `p.m.` to `pm`, single spaces
pub fn clean(text: &str) -> String {
    let text = text.replace(|c: char| c == '–' || c == '—', "-");
    let text = ORDINAL_SUFFIX.replace_all(&text, "$1");
    let text = DOTTED_MERIDIEM.replace_all(&text, "${1}m");

    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

struct Input<'a> {
    text: &'a str,
    now: NaiveDateTime,
    defaults: &'a DefaultPolicy,
    duration: Duration,
    fallback_duration: Duration,
    time_span: Option<TimeSpan>,
}

impl Input<'_> {
    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    fn day_span(&self) -> TimeSpan {
        self.time_span.unwrap_or(TimeSpan {
            start: self.defaults.day_start,
            end: Some(self.defaults.day_end),
        })
    }

    fn evening_span(&self) -> TimeSpan {
        self.time_span.unwrap_or(TimeSpan {
            start: self.defaults.evening_start,
            end: Some(self.defaults.evening_end),
        })
    }

    fn spanning(&self, first: NaiveDate, last: NaiveDate) -> Result<ParsedInterval, ParseFailure> {
        self.day_span().between(first, last, self.duration)
    }

    fn on_day(&self, date: NaiveDate) -> Result<ParsedInterval, ParseFailure> {
        self.spanning(date, date)
    }

    /// A time written next to the date wins over the separate time text
    fn on_day_with_time_in(&self, date: NaiveDate, nearby: &str) -> StepResult {
        match time_of_day::find_time(nearby)? {
            Some(time) => TimeSpan::starting_at(time).on(date, self.duration).map(Some),
            None => self.on_day(date).map(Some),
        }
    }
}

fn time_range(input: &Input) -> StepResult {
    let Some((span, offset)) = time_of_day::find_time_range(input.text)? else {
        return Ok(None);
    };

    let leading = TRAILING_CONNECTOR.replace(&input.text[..offset], "");
    let (first, last) = match resolve_days(leading.trim(), input)? {
        Some(days) => days,
        None => (input.today(), input.today()),
    };

    span.between(first, last, input.duration).map(Some)
}

fn date_range(input: &Input) -> StepResult {
    match find_date_range(input.text, input.now)? {
        Some((first, last, end_offset)) => {
            let span = match time_of_day::find_time(&input.text[end_offset..])? {
                Some(time) => Some(TimeSpan::starting_at(time)),
                None => input.time_span,
            };

            span.unwrap_or_else(|| input.day_span())
                .between(first, last, input.duration)
                .map(Some)
        }
        None => Ok(None),
    }
}

fn date_and_time(input: &Input) -> StepResult {
    let Some(found) = find_calendar_date(input.text, input.now)? else {
        return Ok(None);
    };

    let time = match time_of_day::find_time(&input.text[found.end..])? {
        Some(time) => Some(time),
        None => time_of_day::find_time(&input.text[..found.start])?,
    };

    time.map(|time| TimeSpan::starting_at(time).on(found.date, input.duration))
        .transpose()
}

fn date_only(input: &Input) -> StepResult {
    find_calendar_date(input.text, input.now)?
        .map(|found| input.on_day(found.date))
        .transpose()
}

/// Runs ahead of the ISO and numeric steps, so a weekday name wins over a
/// numeric date in the same text
fn weekday(input: &Input) -> StepResult {
    let Some(caps) = WEEKDAY.captures(input.text) else {
        return Ok(None);
    };

    let weekday = parse_weekday(&caps["day"])?;
    let date = next_weekday_after(input.today(), weekday);

    on_resolved_day(input, date, is_night(input.text))
}

fn relative_day(input: &Input) -> StepResult {
    let Some(caps) = RELATIVE_DAY.captures(input.text) else {
        return Ok(None);
    };

    let word = caps["word"].to_lowercase();
    let date = match word.as_str() {
        "tomorrow" => input.today() + Duration::days(1),
        _ => input.today(),
    };

    on_resolved_day(input, date, word == "tonight" || is_night(input.text))
}

fn season(input: &Input) -> StepResult {
    let Some(caps) = SEASON.captures(input.text) else {
        return Ok(None);
    };

    let season = Season::from_str(&caps["season"]).map_err(|_| {
        ParseFailure::InvalidComponents(format!("'{}' is not a season", &caps["season"]))
    })?;
    let year = match caps.name("y") {
        Some(year) => parse_year(year.as_str())?,
        None => input.now.year(),
    };

    let (first, last) = season.bounds(year).ok_or_else(|| {
        ParseFailure::InvalidComponents(format!("no {:?} in year {}", season, year))
    })?;

    input.spanning(first, last).map(Some)
}

fn iso_date(input: &Input) -> StepResult {
    let Some(caps) = ISO_DATE.captures(input.text) else {
        return Ok(None);
    };

    let date = calendar_date(
        parse_year(&caps["y"])?,
        parse_number(&caps["m"])?,
        parse_number(&caps["d"])?,
    )?;

    if let (Some(hour), Some(minute)) = (caps.name("hh"), caps.name("mm")) {
        let time = clock_time(hour.as_str(), Some(minute.as_str()), None)?;
        return TimeSpan::starting_at(time).on(date, input.duration).map(Some);
    }

    input.on_day_with_time_in(date, &input.text[match_end(&caps)..])
}

fn numeric_date(input: &Input) -> StepResult {
    let Some(caps) = NUMERIC_DATE.captures(input.text) else {
        return Ok(None);
    };

    let date = calendar_date(
        parse_year(&caps["y"])?,
        parse_number(&caps["m"])?,
        parse_number(&caps["d"])?,
    )?;

    input.on_day_with_time_in(date, &input.text[match_end(&caps)..])
}

fn generic(input: &Input) -> StepResult {
    let Some(parsed) = parse_generic(input.text) else {
        return Ok(None);
    };

    let start = match parsed {
        GenericDate::DateTime(start) => start,
        GenericDate::Date(date) => date.and_time(input.defaults.day_start),
    };

    TimeSpan::starting_at(start.time())
        .on(start.date(), input.fallback_duration)
        .map(Some)
}

fn on_resolved_day(input: &Input, date: NaiveDate, evening: bool) -> StepResult {
    if let Some(time) = time_of_day::find_time(input.text)? {
        return TimeSpan::starting_at(time).on(date, input.duration).map(Some);
    }

    let span = if evening {
        input.evening_span()
    } else {
        input.day_span()
    };

    span.on(date, input.duration).map(Some)
}

/// Days named by the text in front of a time range
fn resolve_days(text: &str, input: &Input) -> Result<Option<(NaiveDate, NaiveDate)>, ParseFailure> {
    if text.is_empty() {
        return Ok(None);
    }

    if let Some((first, last, _)) = find_date_range(text, input.now)? {
        return Ok(Some((first, last)));
    }

    if let Some(found) = find_calendar_date(text, input.now)? {
        return Ok(Some((found.date, found.date)));
    }

    if let Some(caps) = ISO_DATE.captures(text) {
        let date = calendar_date(
            parse_year(&caps["y"])?,
            parse_number(&caps["m"])?,
            parse_number(&caps["d"])?,
        )?;
        return Ok(Some((date, date)));
    }

    if let Some(caps) = NUMERIC_DATE.captures(text) {
        let date = calendar_date(
            parse_year(&caps["y"])?,
            parse_number(&caps["m"])?,
            parse_number(&caps["d"])?,
        )?;
        return Ok(Some((date, date)));
    }

    if let Some(caps) = WEEKDAY.captures(text) {
        let date = next_weekday_after(input.today(), parse_weekday(&caps["day"])?);
        return Ok(Some((date, date)));
    }

    if let Some(caps) = RELATIVE_DAY.captures(text) {
        let date = if caps["word"].eq_ignore_ascii_case("tomorrow") {
            input.today() + Duration::days(1)
        } else {
            input.today()
        };
        return Ok(Some((date, date)));
    }

    Ok(None)
}

/// `<Month> <Day>[, <Year>] - [<Month>] <Day>[, <Year>]`, with the offset
/// where the match ends
fn find_date_range(
    text: &str,
    now: NaiveDateTime,
) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ParseFailure> {
    let Some(caps) = DATE_RANGE.captures(text) else {
        return Ok(None);
    };

    let start_month = parse_month(&caps["sm"])?;
    let end_month = match caps.name("em") {
        Some(month) => parse_month(month.as_str())?,
        None => start_month,
    };
    let start_day = parse_number(&caps["sd"])?;
    let end_day = parse_number(&caps["ed"])?;

    if caps.name("em").is_none() && end_day < start_day {
        return Err(ParseFailure::InvalidComponents(format!(
            "day range {}-{} runs backwards",
            start_day, end_day
        )));
    }

    let explicit_start_year = caps.name("sy").map(|y| parse_year(y.as_str())).transpose()?;
    let explicit_end_year = caps.name("ey").map(|y| parse_year(y.as_str())).transpose()?;

    let start_year = explicit_start_year
        .or(explicit_end_year)
        .unwrap_or_else(|| now.year());
    let end_year = explicit_end_year
        .or(explicit_start_year)
        .unwrap_or_else(|| now.year());

    let mut first = calendar_date(start_year, start_month, start_day)?;
    let mut last = calendar_date(end_year, end_month, end_day)?;

    if last < first {
        match (explicit_start_year, explicit_end_year) {
            // "Dec 20 - Jan 5, 2026"
            (None, Some(_)) => first = calendar_date(start_year - 1, start_month, start_day)?,
            // "Dec 20 - Jan 5"
            (_, None) => last = calendar_date(end_year + 1, end_month, end_day)?,
            (Some(_), Some(_)) => {
                return Err(ParseFailure::InvalidComponents(format!(
                    "range ends on {} before it starts on {}",
                    last, first
                )))
            }
        }
    }

    Ok(Some((first, last, match_end(&caps))))
}

struct FoundDate {
    date: NaiveDate,
    start: usize,
    end: usize,
}

/// Earliest `<Month> <Day>[, <Year>]` or `<Day> <Month>[ <Year>]` in text
fn find_calendar_date(text: &str, now: NaiveDateTime) -> Result<Option<FoundDate>, ParseFailure> {
    let caps = [MONTH_DAY.captures(text), DAY_MONTH.captures(text)]
        .into_iter()
        .flatten()
        .min_by_key(|caps| caps.get(0).map(|m| m.start()).unwrap_or(usize::MAX));

    let Some(caps) = caps else {
        return Ok(None);
    };

    let year = match caps.name("y") {
        Some(year) => parse_year(year.as_str())?,
        None => now.year(),
    };
    let date = calendar_date(year, parse_month(&caps["m"])?, parse_number(&caps["d"])?)?;

    Ok(caps.get(0).map(|m| FoundDate {
        date,
        start: m.start(),
        end: m.end(),
    }))
}

fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ParseFailure> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ParseFailure::InvalidComponents(format!(
            "{}-{:02}-{:02} is not a calendar date",
            year, month, day
        ))
    })
}

fn parse_month(name: &str) -> Result<u32, ParseFailure> {
    month_number(name)
        .ok_or_else(|| ParseFailure::InvalidComponents(format!("'{}' is not a month", name)))
}

fn parse_year(digits: &str) -> Result<i32, ParseFailure> {
    digits
        .parse()
        .map_err(|_| ParseFailure::InvalidComponents(format!("'{}' is not a year", digits)))
}

fn parse_weekday(name: &str) -> Result<Weekday, ParseFailure> {
    Weekday::from_str(name)
        .map_err(|_| ParseFailure::InvalidComponents(format!("'{}' is not a weekday", name)))
}

fn is_night(text: &str) -> bool {
    text.to_lowercase().contains("night")
}

fn match_end(caps: &Captures) -> usize {
    caps.get(0).map(|m| m.end()).unwrap_or_default()
}
