use chrono::{Datelike, Duration, NaiveDate, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

const RANGE_SEPARATOR: &str = r"\s*(?:-|\bto\b|\buntil\b|\bthrough\b|\bthru\b)\s*";

lazy_static! {
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Failed to create whitespace regex");
    pub static ref ORDINAL_SUFFIX: Regex =
        Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("Failed to create ordinal regex");
    pub static ref DOTTED_MERIDIEM: Regex =
        Regex::new(r"(?i)\b([ap])\.\s?m\b\.?").expect("Failed to create meridiem regex");

    pub static ref TIME: Regex = Regex::new(
        r"(?i)\b(?P<h>\d{1,2})(?::(?P<m>\d{2}))?\s*(?P<a>am|pm)?\b"
    )
    .expect("Failed to create time regex");
    pub static ref TIME_RANGE: Regex = Regex::new(&format!(
        r"(?i)\b(?P<sh>\d{{1,2}})(?::(?P<sm>\d{{2}}))?\s*(?P<sa>am|pm)?{RANGE_SEPARATOR}(?P<eh>\d{{1,2}})(?::(?P<em>\d{{2}}))?\s*(?P<ea>am|pm)?\b"
    ))
    .expect("Failed to create time range regex");
    /// Connectors left dangling between a date and the time that follows it
    pub static ref TRAILING_CONNECTOR: Regex = Regex::new(
        r"(?i)(?:[\s,@|:·-]|\bat\b|\bfrom\b|\bdoors\b|\bopen\b|\bevent\b|\bshow\b)+$"
    )
    .expect("Failed to create connector regex");

    pub static ref DATE_RANGE: Regex = Regex::new(&format!(
        r"(?i)\b(?P<sm>{MONTH})\.?\s+(?P<sd>\d{{1,2}})\b(?:,?\s*(?P<sy>\d{{4}})\b)?{RANGE_SEPARATOR}(?:(?P<em>{MONTH})\.?\s+)?(?P<ed>\d{{1,2}})\b(?:,?\s*(?P<ey>\d{{4}})\b)?"
    ))
    .expect("Failed to create date range regex");
    pub static ref MONTH_DAY: Regex = Regex::new(&format!(
        r"(?i)\b(?P<m>{MONTH})\.?\s+(?P<d>\d{{1,2}})\b(?:,?\s*(?P<y>\d{{4}})\b)?"
    ))
    .expect("Failed to create month-day regex");
    pub static ref DAY_MONTH: Regex = Regex::new(&format!(
        r"(?i)\b(?P<d>\d{{1,2}})\s+(?P<m>{MONTH})\b\.?(?:,?\s*(?P<y>\d{{4}})\b)?"
    ))
    .expect("Failed to create day-month regex");

    pub static ref WEEKDAY: Regex = Regex::new(
        r"(?i)\b(?P<day>monday|tuesday|wednesday|thursday|friday|saturday|sunday)s?\b"
    )
    .expect("Failed to create weekday regex");
    pub static ref RELATIVE_DAY: Regex =
        Regex::new(r"(?i)\b(?P<word>today|tonight|tomorrow)\b").expect("Failed to create relative day regex");
    pub static ref SEASON: Regex = Regex::new(
        r"(?i)\b(?P<season>summer|fall|autumn|winter|spring)\b(?:\s+(?P<y>\d{4})\b)?"
    )
    .expect("Failed to create season regex");

    pub static ref ISO_DATE: Regex = Regex::new(
        r"(?i)\b(?P<y>\d{4})-(?P<m>\d{1,2})-(?P<d>\d{1,2})(?:[t\s](?P<hh>\d{1,2}):(?P<mm>\d{2}))?"
    )
    .expect("Failed to create ISO date regex");
    pub static ref NUMERIC_DATE: Regex =
        Regex::new(r"\b(?P<m>\d{1,2})/(?P<d>\d{1,2})/(?P<y>\d{4})\b").expect("Failed to create numeric date regex");
}

/// Month number for a full or abbreviated English month name
pub fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();

    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// First `weekday` strictly after `date`; a week ahead when `date` already is one
pub fn next_weekday_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = date.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;

    let mut days_ahead = (target - current).rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }

    date + Duration::days(days_ahead)
}
