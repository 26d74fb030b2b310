// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;
use wellness_domain::{Event, parse_event_date};

use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: i64,
    event_type: String,
    event_name: String,
    event_date: String,
}

impl EventRow {
    fn into_event(self) -> Result<Event, PersistenceError> {
        Ok(Event {
            event_id: Some(self.event_id),
            event_type: self.event_type,
            event_name: self.event_name,
            event_date: parse_event_date(&self.event_date)?,
        })
    }
}

backend_fn! {
/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored date is malformed.
/// Returns `Ok(None)` if the event does not exist.
pub fn get_event(conn: &mut _, event_id: i64) -> Result<Option<Event>, PersistenceError> {
    debug!(event_id, "Looking up event");

    events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first::<EventRow>(conn)
        .optional()?
        .map(EventRow::into_event)
        .transpose()
}
}

backend_fn! {
/// Resolves an event by name.
///
/// An exact match wins; otherwise the first event (by id) whose name matches
/// case-insensitively is returned. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_event_by_name(conn: &mut _, name: &str) -> Result<Option<Event>, PersistenceError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    debug!(event_name = trimmed, "Resolving event by name");

    let exact: Option<EventRow> = events::table
        .filter(events::event_name.eq(trimmed))
        .order(events::event_id.asc())
        .select(EventRow::as_select())
        .first(conn)
        .optional()?;

    if let Some(row) = exact {
        return row.into_event().map(Some);
    }

    let folded: String = trimmed.to_lowercase();
    let rows: Vec<EventRow> = events::table
        .order(events::event_id.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .find(|row| row.event_name.trim().to_lowercase() == folded)
        .map(EventRow::into_event)
        .transpose()
}
}

backend_fn! {
/// Lists all events ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(conn: &mut _) -> Result<Vec<Event>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .order(events::event_id.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(EventRow::into_event).collect()
}
}
