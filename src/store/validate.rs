//! Field-level checks applied before a row is written.

use super::error::{StoreError, StoreResult};

pub const NAME_MAX: usize = 255;
pub const TITLE_MAX: usize = 500;
pub const URL_MAX: usize = 500;
pub const WEBSITE_MAX: usize = 255;
pub const EMAIL_MAX: usize = 255;
pub const PHONE_MAX: usize = 20;
pub const REGISTRATION_NUMBER_MAX: usize = 100;
pub const SHORT_LABEL_MAX: usize = 50;

/// Non-blank and at most `max` characters.
pub fn required(field: &str, value: &str, max: usize) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{field} is required")));
    }
    bounded(field, value, max)
}

/// At most `max` characters when present.
pub fn optional(field: &str, value: Option<&str>, max: usize) -> StoreResult<()> {
    match value {
        Some(value) => bounded(field, value, max),
        None => Ok(()),
    }
}

pub fn finite(field: &str, value: Option<f64>) -> StoreResult<()> {
    match value {
        Some(v) if !v.is_finite() => Err(StoreError::validation(format!(
            "{field} must be a finite number"
        ))),
        _ => Ok(()),
    }
}

fn bounded(field: &str, value: &str, max: usize) -> StoreResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::validation(format!(
            "{field} exceeds {max} characters ({len})"
        )));
    }
    Ok(())
}
