//! Business-day arithmetic for due dates.
//!
//! A business day is any day that is not Saturday or Sunday. No holiday
//! calendar is applied.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Whether `date` falls on a Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Due date `business_days` business days after `start`.
///
/// A weekend start is first moved to the following Monday, so a loan taken on
/// Saturday or Sunday counts from Monday. The result is never a weekend day.
pub fn compute_due_date(start: NaiveDate, business_days: u32) -> NaiveDate {
    let mut current = match start.weekday() {
        Weekday::Sat => start + Duration::days(2),
        Weekday::Sun => start + Duration::days(1),
        _ => start,
    };

    let mut remaining = business_days;
    while remaining > 0 {
        current += Duration::days(1);
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}

/// Move a date that lands on the weekend to the following Monday.
///
/// Saturday advances two days and Sunday one; weekdays are returned as is.
pub fn adjust_if_lands_on_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}
