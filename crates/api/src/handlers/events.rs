// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use tracing::info;
use wellness_domain::{Event, parse_event_date, validate_event_fields};
use wellness_persistence::{Persistence, PersistenceError};

use crate::auth::AuthenticatedAdmin;
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::load_event;
use crate::request_response::{EventRequest, EventResponse};

fn event_from_request(request: &EventRequest) -> Result<Event, ApiError> {
    let event_date: Date = parse_event_date(&request.event_date)?;
    let event: Event = Event::new(
        request.event_type.trim().to_string(),
        request.event_name.trim().to_string(),
        event_date,
    );
    validate_event_fields(&event)?;
    Ok(event)
}

fn map_event_write_error(err: PersistenceError, event: &Event) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => ApiError::DuplicateFound {
            description: format!(
                "Event \"{}\" of type \"{}\" already exists",
                event.event_name, event.event_type
            ),
        },
        other => translate_persistence_error(other),
    }
}

/// Creates an event.
///
/// # Errors
///
/// Returns an error if:
/// - A field is blank or the date is invalid
/// - An event with the same type and name already exists
pub fn create_event(
    persistence: &mut Persistence,
    request: &EventRequest,
    admin: &AuthenticatedAdmin,
) -> Result<EventResponse, ApiError> {
    let event: Event = event_from_request(request)?;

    let event_id: i64 = persistence
        .create_event(&event)
        .map_err(|e| map_event_write_error(e, &event))?;

    info!(
        event_id,
        event_name = %event.event_name,
        actor = %admin.username,
        "Created event"
    );

    Ok(EventResponse::from_event(&event, event_id)?)
}

/// Retrieves an event.
///
/// # Errors
///
/// Returns `ApiError::EventNotFound` if the event does not exist.
pub fn get_event(persistence: &mut Persistence, event_id: i64) -> Result<EventResponse, ApiError> {
    let event: Event = load_event(persistence, event_id)?;
    Ok(EventResponse::from_event(&event, event_id)?)
}

/// Lists all events in ID order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(persistence: &mut Persistence) -> Result<Vec<EventResponse>, ApiError> {
    let events: Vec<Event> = persistence
        .list_events()
        .map_err(translate_persistence_error)?;

    events
        .iter()
        .filter_map(|event| {
            event
                .event_id
                .map(|event_id| EventResponse::from_event(event, event_id))
        })
        .collect::<Result<Vec<EventResponse>, _>>()
        .map_err(ApiError::from)
}

/// Replaces an event's fields.
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - A field is blank or the date is invalid
/// - The new type and name collide with another event
pub fn update_event(
    persistence: &mut Persistence,
    event_id: i64,
    request: &EventRequest,
    admin: &AuthenticatedAdmin,
) -> Result<EventResponse, ApiError> {
    load_event(persistence, event_id)?;
    let event: Event = event_from_request(request)?;

    persistence
        .update_event(event_id, &event)
        .map_err(|e| map_event_write_error(e, &event))?;

    info!(event_id, actor = %admin.username, "Updated event");

    Ok(EventResponse::from_event(&event, event_id)?)
}

/// Deletes an event together with its registrations, attendance and evaluations.
///
/// # Errors
///
/// Returns `ApiError::EventNotFound` if the event does not exist.
pub fn delete_event(
    persistence: &mut Persistence,
    event_id: i64,
    admin: &AuthenticatedAdmin,
) -> Result<(), ApiError> {
    persistence.delete_event(event_id).map_err(|e| match e {
        PersistenceError::NotFound(_) => ApiError::event_id_not_found(event_id),
        other => translate_persistence_error(other),
    })?;

    info!(event_id, actor = %admin.username, "Deleted event");
    Ok(())
}
