use chrono::{Duration, NaiveDate, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const CLOCK_FORMAT: &str = "%H:%M";
}

// Time Helper functions

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn date_to_string(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), TimeUtils::STANDARD_TIME_FORMAT).ok()
}

/// Today plus `days`, as the `YYYY-MM-DD` string the calendar providers expect.
pub fn days_from_today(days: i64) -> String {
    date_to_string(today_utc() + Duration::days(days))
}

/// First and last calendar day of a month. `None` for an invalid year/month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_month - Duration::days(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_handles_december_and_leap_years() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(date_to_string(first), "2024-02-01");
        assert_eq!(date_to_string(last), "2024-02-29");

        let (_, last) = month_bounds(2023, 12).unwrap();
        assert_eq!(date_to_string(last), "2023-12-31");

        assert!(month_bounds(2024, 13).is_none());
    }
}
