// Expectation Checkers
//
// Pure predicates over an `Outcome`. Each returns `Err(CheckFailure)` instead
// of panicking, so the engine can run every checker of a scenario and report
// all mismatches at once.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::client::{AlertLevel, Outcome};

/// A single failed expectation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckFailure {
    #[error("expected no error, got: {0}")]
    UnexpectedError(String),

    #[error("expected an error, got none")]
    MissingError,

    #[error("expected status {expected}, got {actual}")]
    StatusMismatch {
        expected: StatusCode,
        actual: StatusCode,
    },

    #[error("expected response length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("expected response length of at least {minimum}, got {actual}")]
    LengthBelow { minimum: usize, actual: usize },

    #[error("expected a non-empty response to check field '{0}'")]
    EmptyResponse(String),

    #[error("expected field '{field}' of response item {index} to not be null")]
    MissingField { field: String, index: usize },

    #[error("expected field '{field}' of response item {index} to be {expected}, got {actual}")]
    FieldMismatch {
        field: String,
        index: usize,
        expected: Value,
        actual: Value,
    },

    #[error("response item {index} could not be inspected: {reason}")]
    Unreadable { index: usize, reason: String },

    #[error("expected alerts, got none")]
    MissingAlerts,

    #[error("expected no alerts, got {0}")]
    UnexpectedAlerts(String),

    #[error("expected an alert with level {0}")]
    MissingAlertLevel(AlertLevel),
}

/// An expectation attached to a scenario
pub type Check<T> = Box<dyn Fn(&Outcome<T>) -> Result<(), CheckFailure> + Send + Sync>;

/// The API returned no error
pub fn no_error<T>() -> Check<T> {
    Box::new(|outcome: &Outcome<T>| match &outcome.error {
        None => Ok(()),
        Some(error) => Err(CheckFailure::UnexpectedError(error.to_string())),
    })
}

/// The API returned an error response
pub fn has_error<T>() -> Check<T> {
    Box::new(|outcome: &Outcome<T>| match &outcome.error {
        Some(_) => Ok(()),
        None => Err(CheckFailure::MissingError),
    })
}

pub fn has_status<T>(expected: StatusCode) -> Check<T> {
    Box::new(move |outcome: &Outcome<T>| {
        let actual = outcome.info.status;
        if actual == expected {
            Ok(())
        } else {
            Err(CheckFailure::StatusMismatch { expected, actual })
        }
    })
}

pub fn response_has_length<T>(expected: usize) -> Check<T> {
    Box::new(move |outcome: &Outcome<T>| {
        let actual = outcome.response.len();
        if actual == expected {
            Ok(())
        } else {
            Err(CheckFailure::LengthMismatch { expected, actual })
        }
    })
}

pub fn response_length_at_least<T>(minimum: usize) -> Check<T> {
    Box::new(move |outcome: &Outcome<T>| {
        let actual = outcome.response.len();
        if actual >= minimum {
            Ok(())
        } else {
            Err(CheckFailure::LengthBelow { minimum, actual })
        }
    })
}

/// Every response item has `field` (JSON name) set and equal to `expected`
///
/// A missing or null field is reported as `MissingField`, never as a
/// mismatch. An empty response fails.
pub fn field_equals<T: Serialize>(field: &str, expected: impl Into<Value>) -> Check<T> {
    let field = field.to_string();
    let expected = expected.into();

    Box::new(move |outcome: &Outcome<T>| {
        if outcome.response.is_empty() {
            return Err(CheckFailure::EmptyResponse(field.clone()));
        }

        for (index, item) in outcome.response.iter().enumerate() {
            let value = serde_json::to_value(item).map_err(|e| CheckFailure::Unreadable {
                index,
                reason: e.to_string(),
            })?;

            match value.get(&field) {
                None | Some(Value::Null) => {
                    return Err(CheckFailure::MissingField {
                        field: field.clone(),
                        index,
                    })
                }
                Some(actual) if !same_value(actual, &expected) => {
                    return Err(CheckFailure::FieldMismatch {
                        field: field.clone(),
                        index,
                        expected: expected.clone(),
                        actual: actual.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    })
}

/// JSON equality where `17` and `17.0` are the same number
fn same_value(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => actual == expected,
    }
}

pub fn has_alerts<T>() -> Check<T> {
    Box::new(|outcome: &Outcome<T>| {
        if outcome.alerts.is_empty() {
            Err(CheckFailure::MissingAlerts)
        } else {
            Ok(())
        }
    })
}

pub fn no_alerts<T>() -> Check<T> {
    Box::new(|outcome: &Outcome<T>| {
        if outcome.alerts.is_empty() {
            Ok(())
        } else {
            Err(CheckFailure::UnexpectedAlerts(outcome.alerts.to_string()))
        }
    })
}

pub fn has_alert_level<T>(level: AlertLevel) -> Check<T> {
    Box::new(move |outcome: &Outcome<T>| {
        if outcome.alerts.has_level(level) {
            Ok(())
        } else {
            Err(CheckFailure::MissingAlertLevel(level))
        }
    })
}

/// Run checks in order and collect every failure
pub fn run_all<T>(checks: &[Check<T>], outcome: &Outcome<T>) -> Vec<CheckFailure> {
    checks
        .iter()
        .filter_map(|check| check(outcome).err())
        .collect()
}
