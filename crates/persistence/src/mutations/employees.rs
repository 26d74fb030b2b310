// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee directory mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;
use wellness_domain::Employee;

use crate::diesel_schema::employees;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a directory entry, or replaces the entry with the same number.
///
/// # Returns
///
/// `true` if a new entry was inserted, `false` if an existing one was updated.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_employee(conn: &mut _, employee: &Employee) -> Result<bool, PersistenceError> {
    let existing: i64 = employees::table
        .filter(employees::employee_no.eq(&employee.employee_no))
        .count()
        .get_result(conn)?;

    if existing > 0 {
        diesel::update(employees::table)
            .filter(employees::employee_no.eq(&employee.employee_no))
            .set((
                employees::employee_name.eq(&employee.employee_name),
                employees::department.eq(&employee.department),
                employees::age.eq(employee.age),
                employees::gender.eq(&employee.gender),
            ))
            .execute(conn)?;
        debug!(employee_no = %employee.employee_no, "Updated directory entry");
        return Ok(false);
    }

    diesel::insert_into(employees::table)
        .values((
            employees::employee_no.eq(&employee.employee_no),
            employees::employee_name.eq(&employee.employee_name),
            employees::department.eq(&employee.department),
            employees::age.eq(employee.age),
            employees::gender.eq(&employee.gender),
        ))
        .execute(conn)?;
    debug!(employee_no = %employee.employee_no, "Inserted directory entry");

    Ok(true)
}
}
