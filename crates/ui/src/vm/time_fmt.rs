use chrono::{DateTime, Utc};

/// Long date with time of day, e.g. `September 1, 2025 at 09:00`.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y at %H:%M").to_string()
}

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Coarse age of `then` relative to `now`, counted in whole days.
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - then).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

/// `m:ss` clock text for a number of seconds.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use induction_core::time::fixed_now;

    #[test]
    fn time_ago_buckets() {
        let now = fixed_now();
        assert_eq!(time_ago(now - Duration::hours(5), now), "Today");
        assert_eq!(time_ago(now - Duration::days(1), now), "Yesterday");
        assert_eq!(time_ago(now - Duration::days(4), now), "4 days ago");
        assert_eq!(time_ago(now - Duration::days(15), now), "2 weeks ago");
        assert_eq!(time_ago(now - Duration::days(95), now), "3 months ago");
        assert_eq!(time_ago(now - Duration::days(800), now), "2 years ago");
    }

    #[test]
    fn future_timestamps_count_as_today() {
        let now = fixed_now();
        assert_eq!(time_ago(now + Duration::days(2), now), "Today");
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(221), "3:41");
    }

    #[test]
    fn datetime_is_human_readable() {
        assert_eq!(format_datetime(fixed_now()), "September 1, 2025 at 09:00");
        assert_eq!(format_date(fixed_now()), "September 1, 2025");
    }
}
