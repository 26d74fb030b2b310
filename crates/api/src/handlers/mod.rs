// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every attendee write follows the same order: the event must exist, entity
//! fields are validated, missing name/department are filled from the employee
//! directory, the identity is resolved, the duplicate guard runs, and only
//! then is the record persisted.

mod admin;
mod attendance;
mod employees;
mod evaluations;
mod events;
mod registrations;

pub use admin::reconcile_duplicates;
pub use attendance::{
    create_attendance, delete_attendance, get_attendance, list_attendance, update_attendance,
};
pub use employees::get_employee;
pub use evaluations::{
    create_evaluation, delete_evaluation, get_evaluation, list_evaluations, update_evaluation,
};
pub use events::{create_event, delete_event, get_event, list_events, update_event};
pub use registrations::{
    create_registration, delete_registration, get_registration, list_registrations,
    update_registration,
};

use tracing::debug;
use wellness_domain::{Employee, Event, normalize_optional};
use wellness_persistence::Persistence;

use crate::error::{ApiError, translate_persistence_error};

/// Loads an event by ID.
///
/// # Errors
///
/// Returns `ApiError::EventNotFound` if the event does not exist.
pub fn load_event(persistence: &mut Persistence, event_id: i64) -> Result<Event, ApiError> {
    persistence
        .get_event(event_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::event_id_not_found(event_id))
}

/// Identifying fields of an attendee record after trimming and autofill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendeeFields {
    pub employee_no: Option<String>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
}

impl AttendeeFields {
    /// Trims raw input, mapping blank values to `None`.
    #[must_use]
    pub fn from_raw(
        employee_no: Option<&str>,
        employee_name: Option<&str>,
        department: Option<&str>,
    ) -> Self {
        Self {
            employee_no: normalize_optional(employee_no),
            employee_name: normalize_optional(employee_name),
            department: normalize_optional(department),
        }
    }

    /// Fills a missing name or department from the employee directory.
    ///
    /// Only applies when an employee number is present. Values supplied by the
    /// caller are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory lookup fails.
    pub fn fill_from_directory(mut self, persistence: &mut Persistence) -> Result<Self, ApiError> {
        let Some(employee_no) = self.employee_no.as_deref() else {
            return Ok(self);
        };
        if self.employee_name.is_some() && self.department.is_some() {
            return Ok(self);
        }

        let entry: Option<Employee> = persistence
            .get_employee(employee_no)
            .map_err(translate_persistence_error)?;

        if let Some(entry) = entry {
            debug!(employee_no = %entry.employee_no, "Filled attendee fields from directory");
            if self.employee_name.is_none() {
                self.employee_name = Some(entry.employee_name);
            }
            if self.department.is_none() {
                self.department = entry.department;
            }
        }

        Ok(self)
    }

    /// Returns the name, which attendance and evaluations require.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if no name was given or found.
    pub fn require_name(&self) -> Result<String, ApiError> {
        self.employee_name
            .clone()
            .ok_or_else(|| ApiError::InvalidInput {
                field: String::from("employee_name"),
                message: String::from(
                    "Employee Name is required and could not be found in the employee directory",
                ),
            })
    }
}
