//! Submission state of the age form.
//!
//! The form keeps the raw text, the errors of the last submit and the outcome
//! of the last submit. Errors are replaced as a whole record on every
//! submit; the "form has errors" flag is derived from them.

use tracing::{debug, info};

use crate::age::{AgeResult, compute_age};
use crate::clock::Clock;
use crate::validate::{DateParts, FieldErrors, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Day,
    Month,
    Year,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Day, Field::Month, Field::Year];

    /// Input placeholder shown for the field.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Day => "DD",
            Field::Month => "MM",
            Field::Year => "YYYY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Nothing submitted yet.
    Idle,
    /// Last submit failed validation.
    Invalid,
    /// Last submit produced a result.
    Computed(AgeResult),
}

#[derive(Debug, Clone)]
pub struct AgeForm {
    parts: DateParts,
    errors: FieldErrors,
    state: FormState,
    last_result: Option<AgeResult>,
}

impl Default for AgeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AgeForm {
    pub fn new() -> Self {
        Self {
            parts: DateParts::default(),
            errors: FieldErrors::default(),
            state: FormState::Idle,
            last_result: None,
        }
    }

    pub fn with_parts(parts: DateParts) -> Self {
        Self {
            parts,
            ..Self::new()
        }
    }

    /// Replaces one field's text and clears that field's error only.
    pub fn set_field(&mut self, field: Field, text: impl Into<String>) {
        let text = text.into();
        match field {
            Field::Day => {
                self.parts.day = text;
                self.errors.day = None;
            }
            Field::Month => {
                self.parts.month = text;
                self.errors.month = None;
            }
            Field::Year => {
                self.parts.year = text;
                self.errors.year = None;
            }
        }
    }

    /// Validates and, when every field passes, computes the age. "Today" is
    /// read once and used for both steps.
    pub fn submit(&mut self, clock: &dyn Clock) -> &FormState {
        let today = clock.today();

        match validate(&self.parts, today) {
            Ok(birth) => {
                let age = compute_age(birth, today);
                info!(%today, %age, "computed age");
                self.errors = FieldErrors::default();
                self.last_result = Some(age);
                self.state = FormState::Computed(age);
            }
            Err(errors) => {
                debug!(fields = ?errors.failing_fields(), "validation failed");
                self.errors = errors;
                self.state = FormState::Invalid;
            }
        }

        &self.state
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Most recent successful result. Survives later failed submits.
    pub fn last_result(&self) -> Option<AgeResult> {
        self.last_result
    }

    /// Fields whose last submit failed, in form order.
    pub fn fields_in_error(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| match field {
                Field::Day => self.errors.day.is_some(),
                Field::Month => self.errors.month.is_some(),
                Field::Year => self.errors.year.is_some(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clock::{CountingClock, FixedClock};
    use crate::validate::FieldError;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn starts_idle_without_errors() {
        let form = AgeForm::new();
        assert_eq!(form.state(), &FormState::Idle);
        assert!(!form.has_errors());
        assert_eq!(form.last_result(), None);
    }

    #[test]
    fn valid_submit_computes() {
        let mut form = AgeForm::with_parts(DateParts::new("14", "6", "1992"));
        let state = *form.submit(&clock());
        assert_eq!(
            state,
            FormState::Computed(AgeResult {
                years: 34,
                months: 4,
                days: 5
            })
        );
        assert!(!form.has_errors());
    }

    #[test]
    fn invalid_submit_reports_every_field() {
        let mut form = AgeForm::with_parts(DateParts::new("32", "0", "2027"));
        assert_eq!(form.submit(&clock()), &FormState::Invalid);
        assert!(form.has_errors());
        assert_eq!(form.fields_in_error(), Field::ALL.to_vec());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = AgeForm::with_parts(DateParts::new("32", "0", "1990"));
        form.submit(&clock());

        form.set_field(Field::Day, "3");
        assert_eq!(form.errors().day, None);
        assert_eq!(form.errors().month, Some(FieldError::InvalidMonth));
        assert_eq!(form.fields_in_error(), vec![Field::Month]);
        assert_eq!(form.parts.day, "3");
    }

    #[test]
    fn failed_submit_keeps_previous_result() {
        let mut form = AgeForm::with_parts(DateParts::new("1", "1", "2000"));
        form.submit(&clock());
        let first = form.last_result();
        assert!(first.is_some());

        form.set_field(Field::Month, "13");
        assert_eq!(form.submit(&clock()), &FormState::Invalid);
        assert_eq!(form.last_result(), first);
    }

    #[test]
    fn successful_resubmit_clears_errors() {
        let mut form = AgeForm::with_parts(DateParts::new("", "5", "2001"));
        form.submit(&clock());
        assert!(form.has_errors());

        form.set_field(Field::Day, "5");
        assert!(matches!(form.submit(&clock()), FormState::Computed(_)));
        assert!(!form.has_errors());
    }

    #[test]
    fn very_old_year_computes() {
        let mut form = AgeForm::with_parts(DateParts::new("1", "1", "-2147483648"));
        let state = *form.submit(&clock());
        assert_eq!(
            state,
            FormState::Computed(AgeResult {
                years: 2026 + 2_147_483_648,
                months: 9,
                days: 18
            })
        );
    }

    #[test]
    fn submit_reads_the_clock_once() {
        let clock = CountingClock::new(clock());
        let mut form = AgeForm::with_parts(DateParts::new("10", "10", "2010"));
        form.submit(&clock);
        assert_eq!(clock.reads(), 1);

        form.set_field(Field::Year, "");
        form.submit(&clock);
        assert_eq!(clock.reads(), 2);
    }
}
