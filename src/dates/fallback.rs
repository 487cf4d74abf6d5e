use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%Y%m%dT%H%M%S",
];

const DATE_FORMATS: [&str; 4] = ["%Y/%m/%d", "%d.%m.%Y", "%Y.%m.%d", "%Y%m%d"];

/// What the generic parse could read out of a whole string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericDate {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

/// Last-resort parse of the whole text against common machine formats.
///
/// Offsets in RFC 3339 / RFC 2822 strings are dropped: the wall-clock time
/// is kept as written.
pub fn parse_generic(text: &str) -> Option<GenericDate> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(GenericDate::DateTime(parsed.naive_local()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(GenericDate::DateTime(parsed.naive_local()));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(GenericDate::DateTime)
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(GenericDate::Date)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_parse_rfc3339_keeping_wall_clock() {
        let parsed = parse_generic("2025-07-16T20:00:00-07:00").unwrap();

        assert_eq!(
            parsed,
            GenericDate::DateTime(
                NaiveDate::from_ymd_opt(2025, 7, 16)
                    .unwrap()
                    .and_hms_opt(20, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test_log::test]
    fn should_parse_dotted_dates() {
        assert_eq!(
            parse_generic("16.07.2025"),
            Some(GenericDate::Date(NaiveDate::from_ymd_opt(2025, 7, 16).unwrap()))
        );
    }

    #[test_log::test]
    fn should_parse_compact_iso_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();

        assert_eq!(parse_generic("20250914"), Some(GenericDate::Date(date)));
        assert_eq!(
            parse_generic("20250914T180000"),
            Some(GenericDate::DateTime(date.and_hms_opt(18, 0, 0).unwrap()))
        );
    }

    #[test_log::test]
    fn when_text_is_garbage_should_return_none() {
        assert_eq!(parse_generic("garbled xyz 123"), None);
    }
}
