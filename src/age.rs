//! Elapsed time between a validated birth date and "today", rendered as
//! "X years, Y months, Z days".
//!
//! Chrono has no year/month/day difference, so the borrows are applied by
//! hand, in a fixed order:
//!   • month underflow (or same month, day not reached yet) borrows a year
//!   • day underflow then borrows the previous month's length and one month
//!
//! The month check is not repeated after the day borrow.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::validate::ValidatedDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeResult {
    pub years: i64,
    pub months: i32,
    pub days: i32,
}

/// Computes the elapsed years, months and days from `birth` to `today`.
///
/// Years saturate at the `i64` bounds rather than overflow.
pub fn compute_age(birth: ValidatedDate, today: NaiveDate) -> AgeResult {
    let mut years = i64::from(today.year()).saturating_sub(birth.year);
    let mut months = today.month() as i32 - birth.month as i32;

    if months < 0 || (months == 0 && today.day() < birth.day) {
        years = years.saturating_sub(1);
        months += 12;
    }

    let mut days = today.day() as i32 - birth.day as i32;

    if days < 0 {
        days += previous_month_len(today) as i32;
        months -= 1;
    }

    AgeResult {
        years,
        months,
        days,
    }
}

/// Length of the month before `today`'s, i.e. the day number of the last day
/// of that month. January looks back at December of the previous year.
fn previous_month_len(today: NaiveDate) -> u32 {
    today
        .with_day(1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            suffix(self.years),
            self.months,
            suffix(self.months.into()),
            self.days,
            suffix(self.days.into())
        )
    }
}

fn suffix(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
