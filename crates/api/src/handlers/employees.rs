// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wellness_persistence::Persistence;

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::EmployeeResponse;

/// Looks up a directory entry for autofill.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee is not in the directory.
pub fn get_employee(
    persistence: &mut Persistence,
    employee_no: &str,
) -> Result<EmployeeResponse, ApiError> {
    let employee_no: &str = employee_no.trim();
    persistence
        .get_employee(employee_no)
        .map_err(translate_persistence_error)?
        .map(EmployeeResponse::from)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_no} is not in the directory"),
        })
}
