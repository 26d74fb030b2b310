// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin token mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::admins;
use crate::error::PersistenceError;

backend_fn! {
/// Ensures an admin with `username` exists and holds `api_token`.
///
/// An existing admin has its token replaced; otherwise a new admin is
/// created.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if another admin already
/// holds the token, or another error if the write fails.
pub fn ensure_admin(
    conn: &mut _,
    username: &str,
    api_token: &str,
) -> Result<i64, PersistenceError> {
    let existing: Option<i64> = admins::table
        .filter(admins::username.eq(username))
        .select(admins::admin_id)
        .first(conn)
        .optional()?;

    if let Some(admin_id) = existing {
        diesel::update(admins::table)
            .filter(admins::admin_id.eq(admin_id))
            .set(admins::api_token.eq(api_token))
            .execute(conn)?;
        info!(admin_id, username, "Refreshed admin token");
        return Ok(admin_id);
    }

    diesel::insert_into(admins::table)
        .values((admins::username.eq(username), admins::api_token.eq(api_token)))
        .execute(conn)?;

    let admin_id: i64 = conn.get_last_insert_rowid()?;
    info!(admin_id, username, "Created admin");

    Ok(admin_id)
}
}
