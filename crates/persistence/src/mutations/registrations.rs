// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;
use wellness_domain::Registration;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::registrations;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a registration.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the unique index rejects
/// the row, or another error if the insert fails.
pub fn create_registration(
    conn: &mut _,
    registration: &Registration,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(registrations::table)
        .values((
            registrations::employee_no.eq(&registration.employee_no),
            registrations::employee_name.eq(&registration.employee_name),
            registrations::department.eq(&registration.department),
            registrations::event_id.eq(registration.event_id),
        ))
        .execute(conn)?;

    let registration_id: i64 = conn.get_last_insert_rowid()?;
    info!(registration_id, event_id = registration.event_id, "Created registration");

    Ok(registration_id)
}
}

backend_fn! {
/// Replaces the fields of an existing registration.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_registration(
    conn: &mut _,
    registration_id: i64,
    registration: &Registration,
) -> Result<(), PersistenceError> {
    diesel::update(registrations::table)
        .filter(registrations::registration_id.eq(registration_id))
        .set((
            registrations::employee_no.eq(&registration.employee_no),
            registrations::employee_name.eq(&registration.employee_name),
            registrations::department.eq(&registration.department),
            registrations::event_id.eq(registration.event_id),
        ))
        .execute(conn)?;

    info!(registration_id, "Updated registration");
    Ok(())
}
}

backend_fn! {
/// Deletes a registration.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the registration does not exist.
pub fn delete_registration(conn: &mut _, registration_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        registrations::table.filter(registrations::registration_id.eq(registration_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Registration {registration_id} not found"
        )));
    }

    info!(registration_id, "Deleted registration");
    Ok(())
}
}
