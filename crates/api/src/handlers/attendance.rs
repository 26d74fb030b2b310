// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use tracing::info;
use wellness_domain::{
    Attendance, AttendanceMode, EntityKind, Event, Identity, ValidationStatus, resolve_identity,
};
use wellness_persistence::{Page, Persistence, PersistenceError};

use crate::auth::AuthenticatedAdmin;
use crate::duplicate_guard::{check_duplicate, map_write_error};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{AttendeeFields, load_event};
use crate::request_response::{AttendanceRequest, AttendanceResponse, ListParams, ListResponse};
use crate::validation_status::compute_status;

/// A validated attendance write, before its status is decided.
struct PreparedAttendance {
    record: Attendance,
    identity: Identity,
    event: Event,
}

fn prepare_attendance(
    persistence: &mut Persistence,
    request: &AttendanceRequest,
    exclude_id: Option<i64>,
) -> Result<PreparedAttendance, ApiError> {
    let event: Event = load_event(persistence, request.event_id)?;
    let mode: AttendanceMode = AttendanceMode::from_str(&request.mode)?;

    let fields: AttendeeFields = AttendeeFields::from_raw(
        request.employee_no.as_deref(),
        request.employee_name.as_deref(),
        request.department.as_deref(),
    )
    .fill_from_directory(persistence)?;

    let identity: Identity = resolve_identity(
        fields.employee_no.as_deref(),
        fields.employee_name.as_deref(),
    )?;
    let employee_name: String = fields.require_name()?;

    check_duplicate(
        persistence,
        EntityKind::Attendance,
        &identity,
        &event,
        exclude_id,
    )?;

    let record: Attendance = Attendance {
        attendance_id: exclude_id,
        employee_no: fields.employee_no,
        employee_name,
        department: fields.department,
        mode,
        validation_status: ValidationStatus::NotRegistered,
        event_id: request.event_id,
    };

    Ok(PreparedAttendance {
        record,
        identity,
        event,
    })
}

/// Records attendance and derives its validation status.
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - The mode is not Onsite or Virtual
/// - No name was given and none is in the directory
/// - Attendance with the same identity already exists for the event
pub fn create_attendance(
    persistence: &mut Persistence,
    request: &AttendanceRequest,
    admin: &AuthenticatedAdmin,
) -> Result<AttendanceResponse, ApiError> {
    let PreparedAttendance {
        mut record,
        identity,
        event,
    } = prepare_attendance(persistence, request, None)?;

    record.validation_status = compute_status(persistence, &identity, record.event_id)?;

    let attendance_id: i64 = persistence
        .create_attendance(&record)
        .map_err(|e| map_write_error(e, EntityKind::Attendance, &identity, &event))?;
    record.attendance_id = Some(attendance_id);

    info!(
        attendance_id,
        %identity,
        event_id = record.event_id,
        status = %record.validation_status,
        actor = %admin.username,
        "Recorded attendance"
    );

    AttendanceResponse::from_record(record).ok_or_else(missing_id)
}

/// Retrieves an attendance record.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the record does not exist.
pub fn get_attendance(
    persistence: &mut Persistence,
    attendance_id: i64,
) -> Result<AttendanceResponse, ApiError> {
    persistence
        .get_attendance(attendance_id)
        .map_err(translate_persistence_error)?
        .and_then(AttendanceResponse::from_record)
        .ok_or_else(|| ApiError::record_not_found("Attendance", attendance_id))
}

/// Replaces an attendance record's fields.
///
/// The validation status is recomputed only when the employee number or the
/// event changes; otherwise the stored status is kept.
///
/// # Errors
///
/// Returns an error if the record does not exist, a field is invalid, or the
/// update would collide with another attendance record.
pub fn update_attendance(
    persistence: &mut Persistence,
    attendance_id: i64,
    request: &AttendanceRequest,
    admin: &AuthenticatedAdmin,
) -> Result<AttendanceResponse, ApiError> {
    let existing: Attendance = persistence
        .get_attendance(attendance_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::record_not_found("Attendance", attendance_id))?;

    let PreparedAttendance {
        mut record,
        identity,
        event,
    } = prepare_attendance(persistence, request, Some(attendance_id))?;

    let key_changed: bool =
        existing.employee_no != record.employee_no || existing.event_id != record.event_id;
    record.validation_status = if key_changed {
        compute_status(persistence, &identity, record.event_id)?
    } else {
        existing.validation_status
    };

    persistence
        .update_attendance(attendance_id, &record)
        .map_err(|e| map_write_error(e, EntityKind::Attendance, &identity, &event))?;

    info!(
        attendance_id,
        %identity,
        status = %record.validation_status,
        recomputed = key_changed,
        actor = %admin.username,
        "Updated attendance"
    );

    AttendanceResponse::from_record(record).ok_or_else(missing_id)
}

/// Deletes an attendance record.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the record does not exist.
pub fn delete_attendance(
    persistence: &mut Persistence,
    attendance_id: i64,
    admin: &AuthenticatedAdmin,
) -> Result<(), ApiError> {
    persistence
        .delete_attendance(attendance_id)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::record_not_found("Attendance", attendance_id),
            other => translate_persistence_error(other),
        })?;

    info!(attendance_id, actor = %admin.username, "Deleted attendance");
    Ok(())
}

/// Lists attendance with pagination and an optional event filter.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_attendance(
    persistence: &mut Persistence,
    params: &ListParams,
) -> Result<ListResponse<AttendanceResponse>, ApiError> {
    let page: Page<Attendance> = persistence
        .list_attendance(&params.to_query())
        .map_err(translate_persistence_error)?;

    Ok(ListResponse::from_page(page, AttendanceResponse::from_record))
}

fn missing_id() -> ApiError {
    ApiError::Internal {
        message: String::from("Persisted attendance has no ID"),
    }
}
