// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance validation status.

use tracing::debug;
use wellness_domain::{Identity, ValidationStatus};
use wellness_persistence::Persistence;

use crate::error::{ApiError, translate_persistence_error};

/// Computes whether an attendee was registered for the event.
///
/// Walk-ins are never registered: registrations are matched on employee
/// number only.
///
/// # Errors
///
/// Returns an error if the registration lookup fails.
pub fn compute_status(
    persistence: &mut Persistence,
    identity: &Identity,
    event_id: i64,
) -> Result<ValidationStatus, ApiError> {
    let Identity::ByNumber(employee_no) = identity else {
        return Ok(ValidationStatus::NotRegistered);
    };

    let registered: bool = persistence
        .registration_exists_for_employee(employee_no, event_id)
        .map_err(translate_persistence_error)?;

    debug!(employee_no = %employee_no, event_id, registered, "Computed validation status");

    Ok(if registered {
        ValidationStatus::Registered
    } else {
        ValidationStatus::NotRegistered
    })
}
