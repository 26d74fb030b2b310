// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Neither an employee number nor an employee name was supplied.
    #[error("Employee Name is required for walk-in records.")]
    MissingIdentity,
    /// Mode of attendance is not one of the allowed values.
    #[error("Invalid mode of attendance '{0}' (must be Onsite or Virtual)")]
    InvalidAttendanceMode(String),
    /// Validation status text could not be parsed.
    #[error("Invalid validation status '{0}'")]
    InvalidValidationStatus(String),
    /// A rating field holds a value outside `1..=5` / `NA`.
    #[error("Invalid rating for {field}: '{value}' (must be 1-5 or NA)")]
    InvalidRating {
        /// The rating field name.
        field: String,
        /// The rejected value.
        value: String,
    },
    /// Session helpful flag is not Yes or No.
    #[error("Invalid session helpful value '{0}' (must be Yes or No)")]
    InvalidSessionHelpful(String),
    /// A required text field is empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// The field name.
        field: String,
    },
    /// A date string is not a valid ISO calendar date.
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate {
        /// The rejected value.
        value: String,
        /// The parser's explanation.
        reason: String,
    },
}
