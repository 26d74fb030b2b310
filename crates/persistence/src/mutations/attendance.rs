// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;
use wellness_domain::Attendance;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::attendance;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an attendance record.
///
/// The validation status is stored as given; computing it is the caller's job.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the unique index rejects
/// the row, or another error if the insert fails.
pub fn create_attendance(conn: &mut _, record: &Attendance) -> Result<i64, PersistenceError> {
    diesel::insert_into(attendance::table)
        .values((
            attendance::employee_no.eq(&record.employee_no),
            attendance::employee_name.eq(&record.employee_name),
            attendance::department.eq(&record.department),
            attendance::mode.eq(record.mode.as_str()),
            attendance::validation_status.eq(record.validation_status.as_str()),
            attendance::event_id.eq(record.event_id),
        ))
        .execute(conn)?;

    let attendance_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        attendance_id,
        event_id = record.event_id,
        validation_status = %record.validation_status,
        "Created attendance record"
    );

    Ok(attendance_id)
}
}

backend_fn! {
/// Replaces the fields of an existing attendance record.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_attendance(
    conn: &mut _,
    attendance_id: i64,
    record: &Attendance,
) -> Result<(), PersistenceError> {
    diesel::update(attendance::table)
        .filter(attendance::attendance_id.eq(attendance_id))
        .set((
            attendance::employee_no.eq(&record.employee_no),
            attendance::employee_name.eq(&record.employee_name),
            attendance::department.eq(&record.department),
            attendance::mode.eq(record.mode.as_str()),
            attendance::validation_status.eq(record.validation_status.as_str()),
            attendance::event_id.eq(record.event_id),
        ))
        .execute(conn)?;

    info!(attendance_id, "Updated attendance record");
    Ok(())
}
}

backend_fn! {
/// Deletes an attendance record.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the record does not exist.
pub fn delete_attendance(conn: &mut _, attendance_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(attendance::table.filter(attendance::attendance_id.eq(attendance_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Attendance record {attendance_id} not found"
        )));
    }

    info!(attendance_id, "Deleted attendance record");
    Ok(())
}
}
