use chrono::NaiveDate;

/// Seasons as fixed calendar spans (northern hemisphere)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Season {
    Spring,
    Summer,
    #[strum(serialize = "fall", serialize = "autumn")]
    Fall,
    Winter,
}

impl Season {
    /// First and last day of the season starting in `year`.
    /// Winter ends in the following year.
    pub fn bounds(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let ((start_month, start_day), (end_month, end_day), end_year) = match self {
            Season::Spring => ((3, 21), (6, 20), year),
            Season::Summer => ((6, 21), (9, 22), year),
            Season::Fall => ((9, 23), (12, 20), year),
            Season::Winter => ((12, 21), (3, 20), year + 1),
        };

        Some((
            NaiveDate::from_ymd_opt(year, start_month, start_day)?,
            NaiveDate::from_ymd_opt(end_year, end_month, end_day)?,
        ))
    }
}
