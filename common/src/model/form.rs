//! Field-level validation shared by the chemical and waste forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All problems found in one submitted form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// First message reported for `field`, for display under the input.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was reported.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

pub(crate) fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, format!("{} is required", label));
    }
    value.to_string()
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parses a required, non-negative amount. Returns 0 when invalid so callers
/// can keep collecting errors.
pub(crate) fn required_amount(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, format!("{} is required", label));
        return 0.0;
    }
    match parse_amount(value) {
        Some(amount) => amount,
        None => {
            errors.push(field, format!("{} must be a number of at least 0", label));
            0.0
        }
    }
}

pub(crate) fn optional_amount(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let amount = parse_amount(value);
    if amount.is_none() {
        errors.push(field, format!("{} must be a number of at least 0", label));
    }
    amount
}

pub(crate) fn optional_date(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, format!("{} must be a date (YYYY-MM-DD)", label));
            None
        }
    }
}

fn parse_amount(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}
