// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity-based duplicate lookup across attendee tables.
//!
//! Storage narrows candidates to the event (and, for numbered identities, to
//! the exact employee number). The final identity comparison happens in Rust
//! through [`Identity::matches_record`], because `SQLite`'s `LOWER()` only
//! folds ASCII and would disagree with the resolver on non-ASCII names.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;
use wellness_domain::{EntityKind, Identity};

use crate::data_models::DuplicateMatch;
use crate::diesel_schema::{attendance, evaluations, registrations};
use crate::error::PersistenceError;

/// `(id, employee_no, employee_name)` for one candidate row.
type CandidateRow = (i64, Option<String>, Option<String>);

backend_fn! {
/// Finds the first record of `kind` for `event_id` that carries `identity`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `kind` - Which attendee table to search
/// * `identity` - The resolved identity to look for
/// * `event_id` - The event scope
/// * `exclude_id` - A record to ignore (the record being updated)
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` when no conflicting record exists.
pub fn find_duplicate(
    conn: &mut _,
    kind: EntityKind,
    identity: &Identity,
    event_id: i64,
    exclude_id: Option<i64>,
) -> Result<Option<DuplicateMatch>, PersistenceError> {
    debug!(%kind, %identity, event_id, ?exclude_id, "Checking storage for duplicate");

    let number: Option<&str> = identity.employee_no();

    let candidates: Vec<CandidateRow> = match kind {
        EntityKind::Registration => {
            let mut query = registrations::table
                .filter(registrations::event_id.eq(event_id))
                .order(registrations::registration_id.asc())
                .select((
                    registrations::registration_id,
                    registrations::employee_no,
                    registrations::employee_name,
                ))
                .into_boxed();
            if let Some(n) = number {
                query = query.filter(registrations::employee_no.eq(n));
            }
            query.load(conn)?
        }
        EntityKind::Attendance => {
            let mut query = attendance::table
                .filter(attendance::event_id.eq(event_id))
                .order(attendance::attendance_id.asc())
                .select((
                    attendance::attendance_id,
                    attendance::employee_no,
                    attendance::employee_name.nullable(),
                ))
                .into_boxed();
            if let Some(n) = number {
                query = query.filter(attendance::employee_no.eq(n));
            }
            query.load(conn)?
        }
        EntityKind::Evaluation => {
            let mut query = evaluations::table
                .filter(evaluations::event_id.eq(event_id))
                .order(evaluations::evaluation_id.asc())
                .select((
                    evaluations::evaluation_id,
                    evaluations::employee_no,
                    evaluations::employee_name.nullable(),
                ))
                .into_boxed();
            if let Some(n) = number {
                query = query.filter(evaluations::employee_no.eq(n));
            }
            query.load(conn)?
        }
    };

    Ok(candidates
        .into_iter()
        .filter(|(record_id, _, _)| exclude_id != Some(*record_id))
        .find(|(_, employee_no, employee_name)| {
            identity.matches_record(employee_no.as_deref(), employee_name.as_deref())
        })
        .map(|(record_id, employee_no, employee_name)| DuplicateMatch {
            record_id,
            employee_no,
            employee_name,
            event_id,
            kind,
        }))
}
}
