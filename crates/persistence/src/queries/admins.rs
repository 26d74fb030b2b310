// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin token queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::AdminData;
use crate::diesel_schema::admins;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves the admin that owns an API token.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no admin holds the token.
pub fn find_admin_by_token(
    conn: &mut _,
    api_token: &str,
) -> Result<Option<AdminData>, PersistenceError> {
    let row: Option<(i64, String)> = admins::table
        .filter(admins::api_token.eq(api_token))
        .select((admins::admin_id, admins::username))
        .first(conn)
        .optional()?;

    Ok(row.map(|(admin_id, username)| AdminData { admin_id, username }))
}
}
