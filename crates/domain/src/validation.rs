// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::macros::format_description;

use crate::error::DomainError;
use crate::records::Event;

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string is not a calendar date.
pub fn parse_event_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Formats a date as ISO `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the year cannot be written in four
/// digits.
pub fn format_event_date(date: Date) -> Result<String, DomainError> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| DomainError::InvalidDate {
            value: date.to_string(),
            reason: e.to_string(),
        })
}

/// Validates that an event's text fields are present.
///
/// Uniqueness of `(event_type, event_name)` is enforced by storage.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` naming the first blank field.
pub fn validate_event_fields(event: &Event) -> Result<(), DomainError> {
    require_field("event_type", Some(event.event_type.as_str()))?;
    require_field("event_name", Some(event.event_name.as_str()))?;
    Ok(())
}

/// Requires a non-blank value for a named field.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the value is missing or blank.
pub fn require_field(field: &str, value: Option<&str>) -> Result<String, DomainError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| DomainError::EmptyField {
            field: field.to_string(),
        })
}
