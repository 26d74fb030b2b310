// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;
use wellness_domain::{Event, format_event_date};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new event.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if an event with the same
/// type and name already exists, or another error if the insert fails.
pub fn create_event(conn: &mut _, event: &Event) -> Result<i64, PersistenceError> {
    let event_date: String = format_event_date(event.event_date)?;

    diesel::insert_into(events::table)
        .values((
            events::event_type.eq(&event.event_type),
            events::event_name.eq(&event.event_name),
            events::event_date.eq(&event_date),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;

    info!(event_id, event_name = %event.event_name, "Created event");

    Ok(event_id)
}
}

backend_fn! {
/// Replaces the fields of an existing event.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the new type and name
/// collide with another event, or another error if the update fails.
pub fn update_event(conn: &mut _, event_id: i64, event: &Event) -> Result<(), PersistenceError> {
    let event_date: String = format_event_date(event.event_date)?;

    diesel::update(events::table)
        .filter(events::event_id.eq(event_id))
        .set((
            events::event_type.eq(&event.event_type),
            events::event_name.eq(&event.event_name),
            events::event_date.eq(&event_date),
        ))
        .execute(conn)?;

    info!(event_id, "Updated event");
    Ok(())
}
}

backend_fn! {
/// Deletes an event. Dependent attendee records are removed by the
/// `ON DELETE CASCADE` foreign keys.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the event does not exist.
pub fn delete_event(conn: &mut _, event_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(events::table.filter(events::event_id.eq(event_id)))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Event {event_id} not found")));
    }

    info!(event_id, "Deleted event");
    Ok(())
}
}
