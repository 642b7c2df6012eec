//! Calendar-day helpers shared by the date-based views.

use chrono::{Datelike, Duration, NaiveDate};

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Every day from `first` to `last`, inclusive.
pub fn day_range(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |d| *d <= last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2026, 1, 1), date(2026, 1, 5)), 4);
        assert_eq!(days_between(date(2026, 1, 5), date(2026, 1, 1)), -4);
        assert_eq!(days_between(date(2025, 12, 31), date(2026, 1, 1)), 1);
    }

    #[test]
    fn test_week_start() {
        // 2026-01-01 is a Thursday
        assert_eq!(week_start(date(2026, 1, 1)), date(2025, 12, 29));
        // Sunday belongs to the week that started the previous Monday
        assert_eq!(week_start(date(2026, 1, 4)), date(2025, 12, 29));
        assert_eq!(week_start(date(2026, 1, 5)), date(2026, 1, 5));
    }

    #[test]
    fn test_day_range() {
        let days: Vec<_> = day_range(date(2026, 1, 30), date(2026, 2, 2)).collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], date(2026, 2, 2));
        assert_eq!(day_range(date(2026, 1, 2), date(2026, 1, 1)).count(), 0);
    }
}
