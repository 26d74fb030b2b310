// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duplicate reconciliation for attendee tables.
//!
//! Rows written before the unique indexes existed may share an identity for
//! the same event. For each table this pass:
//!
//! 1. groups rows by resolved identity and event, keeping the lowest id,
//! 2. rewrites blank employee numbers to NULL and padded ones to their
//!    trimmed form, so stored values match what the resolver compares,
//! 3. installs the `(employee_no, event_id)` unique index.
//!
//! Steps 1 and 2 run in one transaction per table. Duplicates are deleted
//! before numbers are rewritten so that trimming a surviving row never
//! collides with a row about to be removed. The index is created
//! afterwards because `MySQL` commits implicitly on DDL.
//!
//! Running the pass again is a no-op: nothing is left to delete and an
//! existing index is reported as [`ConstraintOutcome::AlreadyPresent`].

use std::collections::HashSet;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info, warn};
use wellness_domain::{EntityKind, Identity, resolve_identity};

use crate::backend::PersistenceBackend;
use crate::data_models::{ConstraintOutcome, TableReconciliation};
use crate::diesel_schema::{attendance, evaluations, registrations};
use crate::error::PersistenceError;

/// `(id, employee_no, employee_name, event_id)` for one stored row.
pub type IdentityKey = (i64, Option<String>, Option<String>, i64);

/// What one table needs rewritten and removed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Rows whose employee number is present but blank.
    pub blank_number_ids: Vec<i64>,
    /// Surviving rows whose number has surrounding whitespace, with the
    /// trimmed value to store.
    pub padded_numbers: Vec<(i64, String)>,
    /// Rows that repeat an identity already seen for the same event.
    pub duplicate_ids: Vec<i64>,
}

/// Returns the storage table name for an attendee kind.
#[must_use]
pub const fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Registration => "registrations",
        EntityKind::Attendance => "attendance",
        EntityKind::Evaluation => "evaluations",
    }
}

/// Returns the name of the unique index installed on an attendee table.
#[must_use]
pub fn unique_index_name(kind: EntityKind) -> String {
    format!("idx_{}_employee_event", table_name(kind))
}

/// Decides which rows to normalize and which to delete.
///
/// `rows` must be ordered by ascending id so that the first row of every
/// group survives. Only surviving rows are normalized. Rows with neither a
/// number nor a name are never deleted.
#[must_use]
pub fn plan_cleanup(rows: &[IdentityKey]) -> CleanupPlan {
    let mut plan = CleanupPlan::default();
    let mut seen: HashSet<(Identity, i64)> = HashSet::new();

    for (record_id, employee_no, employee_name, event_id) in rows {
        let is_duplicate: bool =
            resolve_identity(employee_no.as_deref(), employee_name.as_deref())
                .is_ok_and(|identity| !seen.insert((identity, *event_id)));
        if is_duplicate {
            plan.duplicate_ids.push(*record_id);
            continue;
        }

        let Some(number) = employee_no.as_deref() else {
            continue;
        };
        let trimmed: &str = number.trim();
        if trimmed.is_empty() {
            plan.blank_number_ids.push(*record_id);
        } else if trimmed != number {
            plan.padded_numbers.push((*record_id, trimmed.to_string()));
        }
    }

    plan
}

backend_fn! {
/// Removes legacy duplicates from one attendee table and installs its
/// unique index.
///
/// # Errors
///
/// Returns an error if the cleanup transaction fails. Index installation
/// failures are reported in the returned [`ConstraintOutcome`] instead.
pub fn reconcile_table(
    conn: &mut _,
    kind: EntityKind,
) -> Result<TableReconciliation, PersistenceError> {
    let plan: CleanupPlan = conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows: Vec<IdentityKey> = match kind {
            EntityKind::Registration => registrations::table
                .order(registrations::registration_id.asc())
                .select((
                    registrations::registration_id,
                    registrations::employee_no,
                    registrations::employee_name,
                    registrations::event_id,
                ))
                .load(conn)?,
            EntityKind::Attendance => attendance::table
                .order(attendance::attendance_id.asc())
                .select((
                    attendance::attendance_id,
                    attendance::employee_no,
                    attendance::employee_name.nullable(),
                    attendance::event_id,
                ))
                .load(conn)?,
            EntityKind::Evaluation => evaluations::table
                .order(evaluations::evaluation_id.asc())
                .select((
                    evaluations::evaluation_id,
                    evaluations::employee_no,
                    evaluations::employee_name.nullable(),
                    evaluations::event_id,
                ))
                .load(conn)?,
        };

        let plan: CleanupPlan = plan_cleanup(&rows);
        debug!(
            %kind,
            rows = rows.len(),
            blank = plan.blank_number_ids.len(),
            padded = plan.padded_numbers.len(),
            duplicates = plan.duplicate_ids.len(),
            "Planned reconciliation"
        );

        if !plan.duplicate_ids.is_empty() {
            let ids = &plan.duplicate_ids;
            match kind {
                EntityKind::Registration => diesel::delete(
                    registrations::table.filter(registrations::registration_id.eq_any(ids)),
                )
                .execute(conn)?,
                EntityKind::Attendance => {
                    diesel::delete(attendance::table.filter(attendance::attendance_id.eq_any(ids)))
                        .execute(conn)?
                }
                EntityKind::Evaluation => diesel::delete(
                    evaluations::table.filter(evaluations::evaluation_id.eq_any(ids)),
                )
                .execute(conn)?,
            };
        }

        if !plan.blank_number_ids.is_empty() {
            let ids = &plan.blank_number_ids;
            match kind {
                EntityKind::Registration => diesel::update(registrations::table)
                    .filter(registrations::registration_id.eq_any(ids))
                    .set(registrations::employee_no.eq(None::<String>))
                    .execute(conn)?,
                EntityKind::Attendance => diesel::update(attendance::table)
                    .filter(attendance::attendance_id.eq_any(ids))
                    .set(attendance::employee_no.eq(None::<String>))
                    .execute(conn)?,
                EntityKind::Evaluation => diesel::update(evaluations::table)
                    .filter(evaluations::evaluation_id.eq_any(ids))
                    .set(evaluations::employee_no.eq(None::<String>))
                    .execute(conn)?,
            };
        }

        for (record_id, trimmed) in &plan.padded_numbers {
            match kind {
                EntityKind::Registration => diesel::update(registrations::table.find(*record_id))
                    .set(registrations::employee_no.eq(trimmed.as_str()))
                    .execute(conn)?,
                EntityKind::Attendance => diesel::update(attendance::table.find(*record_id))
                    .set(attendance::employee_no.eq(trimmed.as_str()))
                    .execute(conn)?,
                EntityKind::Evaluation => diesel::update(evaluations::table.find(*record_id))
                    .set(evaluations::employee_no.eq(trimmed.as_str()))
                    .execute(conn)?,
            };
        }

        Ok(plan)
    })?;

    // NOTE: DDL is raw SQL (justified - Diesel has no CREATE INDEX DSL)
    let statement: String = format!(
        "CREATE UNIQUE INDEX {} ON {} (employee_no, event_id)",
        unique_index_name(kind),
        table_name(kind)
    );

    let constraint: ConstraintOutcome = match diesel::sql_query(statement).execute(conn) {
        Ok(_) => {
            info!(%kind, "Installed unique index");
            ConstraintOutcome::Installed
        }
        Err(e) if conn.is_duplicate_index_error(&e) => {
            debug!(%kind, "Unique index already present");
            ConstraintOutcome::AlreadyPresent
        }
        Err(e) => {
            warn!(%kind, error = %e, "Could not install unique index");
            ConstraintOutcome::Failed(e.to_string())
        }
    };

    if !plan.duplicate_ids.is_empty() {
        info!(
            %kind,
            deleted = plan.duplicate_ids.len(),
            ids = ?plan.duplicate_ids,
            "Removed duplicate records"
        );
    }

    Ok(TableReconciliation {
        kind,
        blank_numbers_normalized: plan.blank_number_ids.len(),
        padded_numbers_trimmed: plan.padded_numbers.len(),
        duplicates_deleted: plan.duplicate_ids.len(),
        constraint,
    })
}
}
