mod format;
mod time_utils;

pub use format::{format_money, format_ratio, size_label};
pub use time_utils::{
    TimeUtils, date_to_string, days_from_today, month_bounds, parse_date, today_utc,
};
