// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;
use wellness_domain::Registration;

use crate::data_models::{ListQuery, Page};
use crate::diesel_schema::registrations;
use crate::error::PersistenceError;

/// Diesel Queryable struct for registration rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = registrations)]
struct RegistrationRow {
    registration_id: i64,
    employee_no: Option<String>,
    employee_name: Option<String>,
    department: Option<String>,
    event_id: i64,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Self {
            registration_id: Some(row.registration_id),
            employee_no: row.employee_no,
            employee_name: row.employee_name,
            department: row.department,
            event_id: row.event_id,
        }
    }
}

backend_fn! {
/// Retrieves a registration by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_registration(
    conn: &mut _,
    registration_id: i64,
) -> Result<Option<Registration>, PersistenceError> {
    let row: Option<RegistrationRow> = registrations::table
        .filter(registrations::registration_id.eq(registration_id))
        .select(RegistrationRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Registration::from))
}
}

backend_fn! {
/// Lists registrations ordered by ID, with the unpaginated total.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_registrations(
    conn: &mut _,
    query: &ListQuery,
) -> Result<Page<Registration>, PersistenceError> {
    let mut count_query = registrations::table.into_boxed();
    let mut items_query = registrations::table.into_boxed();

    if let Some(event_id) = query.event_id {
        count_query = count_query.filter(registrations::event_id.eq(event_id));
        items_query = items_query.filter(registrations::event_id.eq(event_id));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<RegistrationRow> = items_query
        .order(registrations::registration_id.asc())
        .limit(query.limit)
        .offset(query.offset)
        .select(RegistrationRow::as_select())
        .load(conn)?;

    Ok(Page {
        items: rows.into_iter().map(Registration::from).collect(),
        total,
    })
}
}

backend_fn! {
/// Checks whether a registration with this exact employee number exists
/// for the event.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn registration_exists_for_employee(
    conn: &mut _,
    employee_no: &str,
    event_id: i64,
) -> Result<bool, PersistenceError> {
    debug!(employee_no, event_id, "Probing registration");

    let count: i64 = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::employee_no.eq(employee_no))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}
}
