// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::info;
use wellness_domain::{EntityKind, Event, Identity, Registration, resolve_identity};
use wellness_persistence::{Page, Persistence, PersistenceError};

use crate::auth::AuthenticatedAdmin;
use crate::duplicate_guard::{check_duplicate, map_write_error};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{AttendeeFields, load_event};
use crate::request_response::{
    ListParams, ListResponse, RegistrationRequest, RegistrationResponse,
};

/// Validates a registration request and runs the duplicate guard.
fn prepare_registration(
    persistence: &mut Persistence,
    request: &RegistrationRequest,
    exclude_id: Option<i64>,
) -> Result<(Registration, Identity, Event), ApiError> {
    let event: Event = load_event(persistence, request.event_id)?;

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

    check_duplicate(
        persistence,
        EntityKind::Registration,
        &identity,
        &event,
        exclude_id,
    )?;

    let registration: Registration = Registration {
        registration_id: exclude_id,
        employee_no: fields.employee_no,
        employee_name: fields.employee_name,
        department: fields.department,
        event_id: request.event_id,
    };

    Ok((registration, identity, event))
}

/// Creates a registration.
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - Neither an employee number nor a name was supplied
/// - A registration with the same identity already exists for the event
pub fn create_registration(
    persistence: &mut Persistence,
    request: &RegistrationRequest,
    admin: &AuthenticatedAdmin,
) -> Result<RegistrationResponse, ApiError> {
    let (mut registration, identity, event) = prepare_registration(persistence, request, None)?;

    let registration_id: i64 = persistence
        .create_registration(&registration)
        .map_err(|e| map_write_error(e, EntityKind::Registration, &identity, &event))?;
    registration.registration_id = Some(registration_id);

    info!(
        registration_id,
        %identity,
        event_id = registration.event_id,
        actor = %admin.username,
        "Created registration"
    );

    RegistrationResponse::from_record(registration).ok_or_else(missing_id)
}

/// Retrieves a registration.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the registration does not exist.
pub fn get_registration(
    persistence: &mut Persistence,
    registration_id: i64,
) -> Result<RegistrationResponse, ApiError> {
    persistence
        .get_registration(registration_id)
        .map_err(translate_persistence_error)?
        .and_then(RegistrationResponse::from_record)
        .ok_or_else(|| ApiError::record_not_found("Registration", registration_id))
}

/// Replaces a registration's fields.
///
/// The record being updated is excluded from the duplicate check.
///
/// # Errors
///
/// Returns an error if the registration does not exist or the update would
/// collide with another registration.
pub fn update_registration(
    persistence: &mut Persistence,
    registration_id: i64,
    request: &RegistrationRequest,
    admin: &AuthenticatedAdmin,
) -> Result<RegistrationResponse, ApiError> {
    persistence
        .get_registration(registration_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::record_not_found("Registration", registration_id))?;

    let (registration, identity, event) =
        prepare_registration(persistence, request, Some(registration_id))?;

    persistence
        .update_registration(registration_id, &registration)
        .map_err(|e| map_write_error(e, EntityKind::Registration, &identity, &event))?;

    info!(registration_id, %identity, actor = %admin.username, "Updated registration");

    RegistrationResponse::from_record(registration).ok_or_else(missing_id)
}

/// Deletes a registration.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the registration does not exist.
pub fn delete_registration(
    persistence: &mut Persistence,
    registration_id: i64,
    admin: &AuthenticatedAdmin,
) -> Result<(), ApiError> {
    persistence
        .delete_registration(registration_id)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => {
                ApiError::record_not_found("Registration", registration_id)
            }
            other => translate_persistence_error(other),
        })?;

    info!(registration_id, actor = %admin.username, "Deleted registration");
    Ok(())
}

/// Lists registrations with pagination and an optional event filter.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_registrations(
    persistence: &mut Persistence,
    params: &ListParams,
) -> Result<ListResponse<RegistrationResponse>, ApiError> {
    let page: Page<Registration> = persistence
        .list_registrations(&params.to_query())
        .map_err(translate_persistence_error)?;

    Ok(ListResponse::from_page(page, RegistrationResponse::from_record))
}

fn missing_id() -> ApiError {
    ApiError::Internal {
        message: String::from("Persisted registration has no ID"),
    }
}
