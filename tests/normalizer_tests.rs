use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use discovr::dates::time_of_day::{to_24_hour, Meridiem};
use discovr::dates::{
    normalize, DateTextNormalizer, DefaultPolicy, ParseFailure, PolicyPreset, MAX_DURATION_MINUTES,
};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test_log::test]
fn full_dates_should_keep_their_calendar_date_whatever_now_is() {
    let nows = [at(1999, 12, 31, 23, 59), at(2025, 7, 10, 12, 0), at(2031, 2, 28, 0, 0)];

    for (index, month) in MONTHS.iter().enumerate() {
        let month_number = index as u32 + 1;

        for day in [1, 9, 15, 28] {
            let text = format!("{} {}, 2026", month, day);

            for now in nows {
                let result = normalize(&text, None, now, &DefaultPolicy::default()).unwrap();

                assert_eq!(
                    result.start.date(),
                    NaiveDate::from_ymd_opt(2026, month_number, day).unwrap(),
                    "{}",
                    text
                );
            }
        }
    }
}

#[test_log::test]
fn abbreviated_and_lowercase_months_should_match_full_names() {
    let now = at(2025, 1, 1, 0, 0);

    for month in MONTHS {
        let full = normalize(&format!("{} 12, 2025", month), None, now, &DefaultPolicy::default());
        let short = normalize(
            &format!("{} 12, 2025", &month[..3].to_lowercase()),
            None,
            now,
            &DefaultPolicy::default(),
        );

        assert_eq!(full, short, "{}", month);
    }
}

#[test_log::test]
fn weekdays_should_resolve_strictly_after_now() {
    for offset in 0..7 {
        let now = at(2025, 7, 7, 10, 0) + Duration::days(offset);

        for (name, weekday) in WEEKDAYS {
            let result = normalize(name, None, now, &DefaultPolicy::default()).unwrap();
            let date = result.start.date();

            assert_eq!(date.weekday(), weekday, "{} from {}", name, now);
            assert!(date > now.date(), "{} from {}", name, now);
            assert!(date <= now.date() + Duration::days(7), "{} from {}", name, now);
        }
    }
}

#[test_log::test]
fn formatted_start_dates_should_parse_back_to_the_same_date() {
    let now = at(2025, 3, 1, 0, 0);
    let inputs = [
        "Saturday",
        "Oct 3-5",
        "this summer",
        "2025-09-14",
        "07/04/2025",
        "Jul 19, DOORS @ 8PM",
    ];

    for input in inputs {
        let first = normalize(input, None, now, &DefaultPolicy::default()).unwrap();
        let formatted = first.start.format("%B %-d, %Y").to_string();

        let second = normalize(&formatted, None, now, &DefaultPolicy::default()).unwrap();

        assert_eq!(second.start.date(), first.start.date(), "{} -> {}", input, formatted);
    }
}

#[test_log::test]
fn twelve_hour_conversion_should_follow_the_meridiem_rules() {
    for hour in 1..=11 {
        assert_eq!(to_24_hour(hour, Meridiem::Pm), hour + 12);
        assert_eq!(to_24_hour(hour, Meridiem::Am), hour);
    }

    assert_eq!(to_24_hour(12, Meridiem::Pm), 12);
    assert_eq!(to_24_hour(12, Meridiem::Am), 0);
}

#[test_log::test]
fn normalizing_twice_should_give_identical_results() {
    let now = at(2025, 7, 10, 12, 0);
    let normalizer = DateTextNormalizer::new(DefaultPolicy::from_preset(PolicyPreset::Nightlife));

    for input in ["Friday nights", "Dec 20 - Jan 5", "garbled xyz 123", "", "tonight"] {
        assert_eq!(
            normalizer.normalize(input, Some("10pm - 2am"), now),
            normalizer.normalize(input, Some("10pm - 2am"), now),
            "{}",
            input
        );
    }
}

#[test_log::test]
fn date_with_time_range_scenario() {
    let result = normalize(
        "July 16, 2025 8:00 PM - 10:00 PM",
        None,
        at(2025, 1, 1, 0, 0),
        &DefaultPolicy::default(),
    )
    .unwrap();

    assert_eq!(result.start, at(2025, 7, 16, 20, 0));
    assert_eq!(result.end, at(2025, 7, 16, 22, 0));
}

#[test_log::test]
fn next_saturday_scenario() {
    let policy = DefaultPolicy {
        evening_start: hm(19, 0),
        evening_end: hm(21, 0),
        ..DefaultPolicy::default()
    };

    // Thursday
    let result = normalize("Saturday", None, at(2025, 7, 10, 12, 0), &policy).unwrap();

    assert_eq!(result.start.date(), NaiveDate::from_ymd_opt(2025, 7, 12).unwrap());
}

#[test_log::test]
fn empty_input_scenario() {
    assert_eq!(
        normalize("", None, at(2025, 7, 10, 12, 0), &DefaultPolicy::default()),
        Err(ParseFailure::EmptyInput)
    );
}

#[test_log::test]
fn cross_month_range_scenario() {
    let policy = DefaultPolicy {
        day_start: hm(10, 0),
        day_end: hm(21, 0),
        ..DefaultPolicy::default()
    };

    let result =
        normalize("July 5 - August 31, 2025", None, at(2025, 7, 10, 12, 0), &policy).unwrap();

    assert_eq!(result.start, at(2025, 7, 5, 10, 0));
    assert_eq!(result.end, at(2025, 8, 31, 21, 0));
}

#[test_log::test]
fn garbage_scenario() {
    assert!(matches!(
        normalize(
            "garbled xyz 123",
            None,
            at(2025, 7, 10, 12, 0),
            &DefaultPolicy::default()
        ),
        Err(ParseFailure::UnrecognizedFormat(_))
    ));
}

#[test_log::test]
fn parsed_intervals_should_never_end_before_they_start() {
    let now = at(2025, 7, 10, 12, 0);
    let inputs = [
        ("Fri, Aug 1 | 11pm - 2am", None),
        ("Aug 1, 2025", Some("10:00 PM - 1:00 AM")),
        ("Dec 20 - Jan 5", None),
        ("winter", None),
        ("Saturday night", None),
        ("2025-09-14T23:30", None),
    ];

    for (date_text, time_text) in inputs {
        let result = normalize(
            date_text,
            time_text,
            now,
            &DefaultPolicy::from_preset(PolicyPreset::Nightlife),
        )
        .unwrap();

        assert!(result.end >= result.start, "{} {:?}", date_text, time_text);
    }
}

#[test_log::test]
fn configured_policies_should_never_yield_an_interval_ending_before_it_starts() {
    let now = at(2025, 7, 10, 12, 0);
    let backwards = DefaultPolicy {
        duration_minutes: -60,
        ..DefaultPolicy::default()
    };
    let endless = DefaultPolicy {
        duration_minutes: i64::MAX,
        ..DefaultPolicy::default()
    };

    for policy in [&backwards, &endless] {
        let result = normalize("July 19, 2025 8 PM", None, now, policy);

        assert!(
            matches!(result, Err(ParseFailure::InvalidComponents(_))),
            "{:?}",
            result
        );
    }

    let week_long = DefaultPolicy {
        duration_minutes: MAX_DURATION_MINUTES,
        ..DefaultPolicy::default()
    };
    let result = normalize("July 19, 2025 8 PM", None, now, &week_long).unwrap();
    assert_eq!(result.end, at(2025, 7, 26, 20, 0));
}

#[test_log::test]
fn overnight_times_over_a_date_range_should_end_the_morning_after_the_last_day() {
    let now = at(2025, 1, 1, 0, 0);
    let policy = DefaultPolicy::default();

    let separate_time = normalize("Nov 1 - Nov 3, 2025", Some("10 PM - 2 AM"), now, &policy).unwrap();
    assert_eq!(separate_time.start, at(2025, 11, 1, 22, 0));
    assert_eq!(separate_time.end, at(2025, 11, 4, 2, 0));

    let inline_time = normalize("Nov 1 - Nov 3, 2025 10 PM - 2 AM", None, now, &policy).unwrap();
    assert_eq!(inline_time.start, at(2025, 11, 1, 22, 0));
    assert_eq!(inline_time.end, at(2025, 11, 4, 2, 0));
}

#[test_log::test]
fn venue_style_listings_should_parse() {
    let now = at(2025, 7, 10, 12, 0);
    let policy = DefaultPolicy::default();

    let hollywood = normalize("Friday, June 21, 2024 at 8:00 PM PDT", None, now, &policy).unwrap();
    assert_eq!(hollywood.start, at(2024, 6, 21, 20, 0));

    let ordinal = normalize("Sat Aug 2nd, 7 p.m.", None, now, &policy).unwrap();
    assert_eq!(ordinal.start, at(2025, 8, 2, 19, 0));

    let separate_time = normalize("Sept. 13", Some("Doors at 7 PM"), now, &policy).unwrap();
    assert_eq!(separate_time.start, at(2025, 9, 13, 19, 0));
    assert_eq!(separate_time.end, at(2025, 9, 13, 21, 0));
}

#[test_log::test]
fn when_the_time_text_is_off_the_clock_should_fail_with_invalid_components() {
    let result = normalize(
        "July 16, 2025",
        Some("25:00"),
        at(2025, 7, 10, 12, 0),
        &DefaultPolicy::default(),
    );

    assert!(matches!(result, Err(ParseFailure::InvalidComponents(_))));
}
