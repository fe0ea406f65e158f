// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_key::DateKey;
use crate::error::DomainError;
use crate::time_of_day::TimeOfDay;

/// Validates a strict `YYYY-MM-DD` date field.
///
/// Unlike `DateKey::parse`, this rejects unpadded components: request
/// payloads must carry the canonical form.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the input is not a zero-padded
/// calendar date that exists.
pub fn validate_date(value: &str) -> Result<DateKey, DomainError> {
    DateKey::parse_canonical(value).ok_or_else(|| DomainError::InvalidDate {
        value: value.to_string(),
        reason: String::from("expected an existing calendar date as YYYY-MM-DD"),
    })
}

/// Validates a time-of-day field (`HH:MM`, unpadded hours tolerated).
///
/// # Errors
///
/// Returns `DomainError::InvalidTime` if the input cannot be normalized.
pub fn validate_time(value: &str) -> Result<TimeOfDay, DomainError> {
    TimeOfDay::parse(value)
}

/// Validates a monetary amount.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` unless the amount is finite and
/// strictly positive.
pub fn validate_amount(amount: f64) -> Result<f64, DomainError> {
    if !amount.is_finite() {
        return Err(DomainError::InvalidAmount(format!(
            "{amount} is not a finite number"
        )));
    }
    if amount <= 0.0 {
        return Err(DomainError::InvalidAmount(format!(
            "{amount} must be greater than zero"
        )));
    }
    Ok(amount)
}

/// Validates a positive row identifier coming from a request.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` unless `value` is positive.
pub fn validate_identifier(field: &str, value: i64) -> Result<i64, DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidIdentifier {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}
