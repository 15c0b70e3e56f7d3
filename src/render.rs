use anyhow::Result;
use serde::Serialize;

use crate::age::AgeResult;
use crate::validate::FieldErrors;

const PLACEHOLDER: &str = "--";

/// The three-line result panel. Shows `--` until something was computed.
pub fn result_panel(result: Option<AgeResult>) -> String {
    fn value<T: ToString>(n: Option<T>) -> String {
        n.map_or_else(|| PLACEHOLDER.to_string(), |n| n.to_string())
    }

    format!(
        "{} years\n{} months\n{} days",
        value(result.map(|r| r.years)),
        value(result.map(|r| r.months)),
        value(result.map(|r| r.days)),
    )
}

/// One `field: message` line per failing field.
pub fn error_lines(errors: &FieldErrors) -> String {
    [("day", errors.day), ("month", errors.month), ("year", errors.year)]
        .into_iter()
        .filter_map(|(name, err)| err.map(|err| format!("{name}: {err}")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonOutcome<'a> {
    Computed(&'a AgeResult),
    Invalid { errors: &'a FieldErrors },
}

pub fn result_json(result: &AgeResult) -> Result<String> {
    Ok(serde_json::to_string(&JsonOutcome::Computed(result))?)
}

pub fn errors_json(errors: &FieldErrors) -> Result<String> {
    Ok(serde_json::to_string(&JsonOutcome::Invalid { errors })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::FieldError;

    #[test]
    fn panel_before_and_after_submit() {
        assert_eq!(result_panel(None), "-- years\n-- months\n-- days");
        let result = AgeResult {
            years: 34,
            months: 4,
            days: 5,
        };
        assert_eq!(result_panel(Some(result)), "34 years\n4 months\n5 days");
    }

    #[test]
    fn lists_only_failing_fields() {
        let errors = FieldErrors {
            day: Some(FieldError::InvalidDay),
            month: None,
            year: Some(FieldError::InvalidYear),
        };
        assert_eq!(
            error_lines(&errors),
            "day: Must be a valid day\nyear: Must be in the past"
        );
    }

    #[test]
    fn json_shapes() {
        let result = AgeResult {
            years: 1,
            months: 2,
            days: 3,
        };
        assert_eq!(
            result_json(&result).unwrap(),
            r#"{"years":1,"months":2,"days":3}"#
        );

        let errors = FieldErrors {
            day: None,
            month: Some(FieldError::InvalidMonth),
            year: None,
        };
        assert_eq!(
            errors_json(&errors).unwrap(),
            r#"{"errors":{"day":"","month":"Must be a valid month","year":""}}"#
        );
    }
}
