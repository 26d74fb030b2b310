// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity records.
//!
//! Each record carries an optional database ID: `None` means the record has
//! not been persisted yet.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::DomainError;
use crate::identity::{Identity, resolve_identity};
use crate::types::{AttendanceMode, Ratings, SessionHelpful, ValidationStatus};

/// A wellness event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The canonical numeric identifier assigned by the database.
    pub event_id: Option<i64>,
    /// The event category (e.g. "Seminar", "Sports Fest").
    pub event_type: String,
    /// The event name; unique together with `event_type`.
    pub event_name: String,
    /// The day the event takes place.
    pub event_date: Date,
}

impl Event {
    /// Creates a new, unpersisted event.
    #[must_use]
    pub const fn new(event_type: String, event_name: String, event_date: Date) -> Self {
        Self {
            event_id: None,
            event_type,
            event_name,
            event_date,
        }
    }
}

/// An entry in the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_no: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

/// A pre-event signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub registration_id: Option<i64>,
    pub employee_no: Option<String>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub event_id: i64,
}

impl Registration {
    /// Resolves the attendee identity of this registration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingIdentity` if neither number nor name is set.
    pub fn identity(&self) -> Result<Identity, DomainError> {
        resolve_identity(self.employee_no.as_deref(), self.employee_name.as_deref())
    }
}

/// A record of actual presence at an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub attendance_id: Option<i64>,
    pub employee_no: Option<String>,
    pub employee_name: String,
    pub department: Option<String>,
    pub mode: AttendanceMode,
    pub validation_status: ValidationStatus,
    pub event_id: i64,
}

impl Attendance {
    /// Resolves the attendee identity of this attendance record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingIdentity` if neither number nor name is set.
    pub fn identity(&self) -> Result<Identity, DomainError> {
        resolve_identity(self.employee_no.as_deref(), Some(&self.employee_name))
    }
}

/// Post-event feedback from one attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub evaluation_id: Option<i64>,
    pub employee_no: Option<String>,
    pub employee_name: String,
    pub event_id: i64,
    pub ratings: Ratings,
    pub session_helpful: SessionHelpful,
}

impl Evaluation {
    /// Resolves the attendee identity of this evaluation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingIdentity` if neither number nor name is set.
    pub fn identity(&self) -> Result<Identity, DomainError> {
        resolve_identity(self.employee_no.as_deref(), Some(&self.employee_name))
    }
}
