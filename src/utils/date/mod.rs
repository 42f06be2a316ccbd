// Date utility functions

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

pub fn start_of_day(date: DateTime<Local>) -> DateTime<Local> {
    at_midnight(date.date_naive())
}

pub fn end_of_day(date: DateTime<Local>) -> DateTime<Local> {
    at_day_end(date.date_naive())
}

/// Midnight at the start of `date` in the local zone.
pub fn at_midnight(date: NaiveDate) -> DateTime<Local> {
    date.and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

/// Last second of `date` in the local zone.
pub fn at_day_end(date: NaiveDate) -> DateTime<Local> {
    date.and_hms_opt(23, 59, 59)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

/// First date of the week containing `date`.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Monday, 1 = Tuesday, ... 6 = Sunday
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_start_monday_based() {
        // 2025-06-05 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(
            week_start(thursday, 0),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
    }

    #[test]
    fn test_week_start_of_week_start_is_identity() {
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(week_start(monday, 0), monday);
    }

    #[test]
    fn test_week_start_sunday_first() {
        // With Sunday as first day, a Thursday rolls back to the prior Sunday
        let thursday = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(
            week_start(thursday, 6),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let start = at_midnight(date);
        let end = at_day_end(date);
        assert!(start < end);
        assert_eq!(end - start, Duration::seconds(86_399));
        assert_eq!(start_of_day(end), start);
        assert_eq!(end_of_day(start), end);
    }
}
