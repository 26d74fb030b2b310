// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee directory queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;
use wellness_domain::Employee;

use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_no: String,
    employee_name: String,
    department: Option<String>,
    age: Option<i32>,
    gender: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            employee_no: row.employee_no,
            employee_name: row.employee_name,
            department: row.department,
            age: row.age,
            gender: row.gender,
        }
    }
}

backend_fn! {
/// Looks up a directory entry by employee number.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the employee is not in the directory.
pub fn get_employee(conn: &mut _, employee_no: &str) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_no, "Looking up employee");

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_no.eq(employee_no))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Employee::from))
}
}

backend_fn! {
/// Counts directory entries.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_employees(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(employees::table.count().get_result::<i64>(conn)?)
}
}
