//! Per-field validation of the raw day / month / year text.
//!
//! Each field is checked on its own. The only outside input is "today",
//! which bounds the year. The day is not checked against the length of the
//! given month.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Raw text as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateParts {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateParts {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }
}

/// A birth date whose fields are individually in range.
///
/// Not necessarily a calendar date: `31/2/2001` passes validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedDate {
    pub day: u32,
    pub month: u32,
    pub year: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Must be a valid day")]
    InvalidDay,

    #[error("Must be a valid month")]
    InvalidMonth,

    #[error("Must be in the past")]
    InvalidYear,
}

/// One slot per field, `None` meaning the field is fine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(serialize_with = "message_or_empty")]
    pub day: Option<FieldError>,
    #[serde(serialize_with = "message_or_empty")]
    pub month: Option<FieldError>,
    #[serde(serialize_with = "message_or_empty")]
    pub year: Option<FieldError>,
}

impl FieldErrors {
    pub fn has_errors(&self) -> bool {
        self.day.is_some() || self.month.is_some() || self.year.is_some()
    }

    /// Names of the fields currently in error, in form order.
    pub fn failing_fields(&self) -> Vec<&'static str> {
        [("day", self.day), ("month", self.month), ("year", self.year)]
            .into_iter()
            .filter_map(|(name, err)| err.map(|_| name))
            .collect()
    }
}

fn message_or_empty<S: Serializer>(err: &Option<FieldError>, s: S) -> Result<S::Ok, S::Error> {
    match err {
        Some(err) => s.collect_str(err),
        None => s.serialize_str(""),
    }
}

/// Reads a field as a finite decimal number, ignoring surrounding
/// whitespace. Fractions and exponents are allowed (`1.5`, `1e1`).
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Range-checks the numeric value, then keeps its integer part.
pub fn parse_day(text: &str) -> Result<u32, FieldError> {
    match parse_number(text) {
        Some(day) if (1.0..=31.0).contains(&day) => Ok(day.trunc() as u32),
        _ => Err(FieldError::InvalidDay),
    }
}

pub fn parse_month(text: &str) -> Result<u32, FieldError> {
    match parse_number(text) {
        Some(month) if (1.0..=12.0).contains(&month) => Ok(month.trunc() as u32),
        _ => Err(FieldError::InvalidMonth),
    }
}

/// Any year up to and including `today`'s year is accepted, zero and
/// negative years included. Magnitudes past `i64` saturate.
pub fn parse_year(text: &str, today: NaiveDate) -> Result<i64, FieldError> {
    match parse_number(text) {
        Some(year) if year <= f64::from(today.year()) => Ok(year.trunc() as i64),
        _ => Err(FieldError::InvalidYear),
    }
}

pub fn validate_day(text: &str) -> Option<FieldError> {
    parse_day(text).err()
}

pub fn validate_month(text: &str) -> Option<FieldError> {
    parse_month(text).err()
}

pub fn validate_year(text: &str, today: NaiveDate) -> Option<FieldError> {
    parse_year(text, today).err()
}

/// Runs all three validators; never stops at the first failure.
pub fn validate_fields(parts: &DateParts, today: NaiveDate) -> FieldErrors {
    match validate(parts, today) {
        Ok(_) => FieldErrors::default(),
        Err(errors) => errors,
    }
}

/// Validates every field and builds the [`ValidatedDate`] when all pass.
pub fn validate(parts: &DateParts, today: NaiveDate) -> Result<ValidatedDate, FieldErrors> {
    match (
        parse_day(&parts.day),
        parse_month(&parts.month),
        parse_year(&parts.year, today),
    ) {
        (Ok(day), Ok(month), Ok(year)) => Ok(ValidatedDate { day, month, year }),
        (day, month, year) => Err(FieldErrors {
            day: day.err(),
            month: month.err(),
            year: year.err(),
        }),
    }
}
