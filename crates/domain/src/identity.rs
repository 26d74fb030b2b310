// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendee identity resolution.
//!
//! An attendee is identified either by an employee number or, for walk-ins
//! without a number, by their case-folded name. The branch is taken once,
//! here, and every downstream uniqueness check works on the resulting
//! [`Identity`].

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The canonical identity of an attendee for uniqueness checks.
///
/// The two variants never compare equal to each other, even when the text
/// inside happens to match: a walk-in named `e001` is not employee `E001`
/// nor employee `e001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    /// A trimmed employee number, compared verbatim (case-sensitive).
    ByNumber(String),
    /// A trimmed, lowercased employee name for records without a number.
    ByName(String),
}

impl Identity {
    /// Returns the employee number if this identity is number-based.
    #[must_use]
    pub fn employee_no(&self) -> Option<&str> {
        match self {
            Self::ByNumber(number) => Some(number),
            Self::ByName(_) => None,
        }
    }

    /// Checks whether a stored record carries this identity.
    ///
    /// Number identities match the stored number exactly. Name identities
    /// match the stored name after the same trim and lowercase applied by
    /// [`resolve_identity`].
    #[must_use]
    pub fn matches_record(&self, employee_no: Option<&str>, employee_name: Option<&str>) -> bool {
        match self {
            Self::ByNumber(number) => employee_no == Some(number.as_str()),
            Self::ByName(name) => {
                employee_name.is_some_and(|stored| &fold_name(stored) == name)
            }
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByNumber(number) => write!(f, "employee number '{number}'"),
            Self::ByName(name) => write!(f, "walk-in '{name}'"),
        }
    }
}

/// Trims an optional raw field, mapping blank input to `None`.
#[must_use]
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolves the attendee identity from raw employee number and name input.
///
/// A non-empty employee number always takes precedence over the name.
///
/// # Arguments
///
/// * `raw_employee_no` - The employee number as entered, possibly blank
/// * `raw_employee_name` - The employee name as entered, possibly blank
///
/// # Errors
///
/// Returns `DomainError::MissingIdentity` when both inputs are blank.
pub fn resolve_identity(
    raw_employee_no: Option<&str>,
    raw_employee_name: Option<&str>,
) -> Result<Identity, DomainError> {
    if let Some(number) = normalize_optional(raw_employee_no) {
        return Ok(Identity::ByNumber(number));
    }

    normalize_optional(raw_employee_name)
        .map(|name| Identity::ByName(fold_name(&name)))
        .ok_or(DomainError::MissingIdentity)
}
