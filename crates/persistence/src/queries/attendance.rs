// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use wellness_domain::Attendance;

use crate::data_models::{ListQuery, Page};
use crate::diesel_schema::attendance;
use crate::error::PersistenceError;

/// Diesel Queryable struct for attendance rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = attendance)]
struct AttendanceRow {
    attendance_id: i64,
    employee_no: Option<String>,
    employee_name: String,
    department: Option<String>,
    mode: String,
    validation_status: String,
    event_id: i64,
}

impl AttendanceRow {
    fn into_attendance(self) -> Result<Attendance, PersistenceError> {
        Ok(Attendance {
            attendance_id: Some(self.attendance_id),
            employee_no: self.employee_no,
            employee_name: self.employee_name,
            department: self.department,
            mode: self.mode.parse()?,
            validation_status: self.validation_status.parse()?,
            event_id: self.event_id,
        })
    }
}

backend_fn! {
/// Retrieves an attendance record by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored enum value is invalid.
pub fn get_attendance(
    conn: &mut _,
    attendance_id: i64,
) -> Result<Option<Attendance>, PersistenceError> {
    attendance::table
        .filter(attendance::attendance_id.eq(attendance_id))
        .select(AttendanceRow::as_select())
        .first::<AttendanceRow>(conn)
        .optional()?
        .map(AttendanceRow::into_attendance)
        .transpose()
}
}

backend_fn! {
/// Lists attendance records ordered by ID, with the unpaginated total.
///
/// # Errors
///
/// Returns an error if the query fails or a stored enum value is invalid.
pub fn list_attendance(
    conn: &mut _,
    query: &ListQuery,
) -> Result<Page<Attendance>, PersistenceError> {
    let mut count_query = attendance::table.into_boxed();
    let mut items_query = attendance::table.into_boxed();

    if let Some(event_id) = query.event_id {
        count_query = count_query.filter(attendance::event_id.eq(event_id));
        items_query = items_query.filter(attendance::event_id.eq(event_id));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<AttendanceRow> = items_query
        .order(attendance::attendance_id.asc())
        .limit(query.limit)
        .offset(query.offset)
        .select(AttendanceRow::as_select())
        .load(conn)?;

    Ok(Page {
        items: rows
            .into_iter()
            .map(AttendanceRow::into_attendance)
            .collect::<Result<Vec<_>, _>>()?,
        total,
    })
}
}

backend_fn! {
/// Lists every attendance record, optionally for one event, for export.
///
/// # Errors
///
/// Returns an error if the query fails or a stored enum value is invalid.
pub fn list_all_attendance(
    conn: &mut _,
    event_id: Option<i64>,
) -> Result<Vec<Attendance>, PersistenceError> {
    let mut query = attendance::table
        .order(attendance::attendance_id.asc())
        .select(AttendanceRow::as_select())
        .into_boxed();

    if let Some(id) = event_id {
        query = query.filter(attendance::event_id.eq(id));
    }

    let rows: Vec<AttendanceRow> = query.load(conn)?;
    rows.into_iter().map(AttendanceRow::into_attendance).collect()
}
}
