//! Day-level date arithmetic shared by the layout core.
//!
//! Every component that needs a week boundary or a day count goes through
//! these functions; nothing else in the workspace computes week columns by
//! hand.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::config::FirstWeekday;

/// Project a date-time to its date-only form. Times of day are irrelevant
/// to the layout; idempotent by construction.
pub fn normalize(moment: NaiveDateTime) -> NaiveDate {
    moment.date()
}

/// Canonical integer encoding of a day: `y*10000 + m*100 + d`.
/// Used as a map key in hot paths instead of formatted date strings.
pub fn day_key(day: NaiveDate) -> i32 {
    day.year() * 10_000 + day.month() as i32 * 100 + day.day() as i32
}

/// Number of days in the closed interval `[a, b]`, counting both endpoints.
/// Negative when `b < a`.
pub fn days_inclusive(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days() + 1
}

/// Inclusive iterator over the days from `a` to `b`
pub fn day_range(a: NaiveDate, b: NaiveDate) -> DayRange {
    DayRange {
        next: if a <= b { Some(a) } else { None },
        end: b,
    }
}

/// Iterator produced by [`day_range`]
#[derive(Clone, Debug)]
pub struct DayRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }
}

/// Zero-based position (0..=6) of the day within its week row
pub fn week_column(day: NaiveDate, first_weekday: FirstWeekday) -> usize {
    let column = match first_weekday {
        FirstWeekday::Monday => day.weekday().num_days_from_monday(),
        FirstWeekday::Sunday => day.weekday().num_days_from_sunday(),
    };
    column as usize
}

/// First day of the week row containing `day`
pub fn week_start(day: NaiveDate, first_weekday: FirstWeekday) -> NaiveDate {
    day - Duration::days(week_column(day, first_weekday) as i64)
}

/// Columns left in the week row starting at `day`, `day` included
pub fn remaining_in_week(day: NaiveDate, first_weekday: FirstWeekday) -> usize {
    7 - week_column(day, first_weekday)
}

/// First and last day of the given calendar month, or `None` for an
/// out-of-range month number.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first - Duration::days(1)))
}

/// Number of days in the given calendar month (0 for invalid months)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    month_bounds(year, month)
        .map(|(first, last)| days_inclusive(first, last) as u32)
        .unwrap_or(0)
}

/// First day of the month containing `day`
pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Last day of the month containing `day`
pub fn last_of_month(day: NaiveDate) -> NaiveDate {
    month_bounds(day.year(), day.month())
        .map(|(_, last)| last)
        .unwrap_or(day)
}
