// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;
use wellness_domain::Evaluation;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::evaluations;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an evaluation.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the unique index rejects
/// the row, or another error if the insert fails.
pub fn create_evaluation(conn: &mut _, record: &Evaluation) -> Result<i64, PersistenceError> {
    let r = &record.ratings;

    diesel::insert_into(evaluations::table)
        .values((
            evaluations::employee_no.eq(&record.employee_no),
            evaluations::employee_name.eq(&record.employee_name),
            evaluations::event_id.eq(record.event_id),
            evaluations::program_objectives.eq(r.program_objectives.to_stored()),
            evaluations::topic_relevance.eq(r.topic_relevance.to_stored()),
            evaluations::speaker_knowledge.eq(r.speaker_knowledge.to_stored()),
            evaluations::speaker_delivery.eq(r.speaker_delivery.to_stored()),
            evaluations::materials.eq(r.materials.to_stored()),
            evaluations::venue.eq(r.venue.to_stored()),
            evaluations::time_management.eq(r.time_management.to_stored()),
            evaluations::organization.eq(r.organization.to_stored()),
            evaluations::overall_rating.eq(r.overall_rating.to_stored()),
            evaluations::session_helpful.eq(record.session_helpful.as_str()),
        ))
        .execute(conn)?;

    let evaluation_id: i64 = conn.get_last_insert_rowid()?;
    info!(evaluation_id, event_id = record.event_id, "Created evaluation");

    Ok(evaluation_id)
}
}

backend_fn! {
/// Replaces the fields of an existing evaluation.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_evaluation(
    conn: &mut _,
    evaluation_id: i64,
    record: &Evaluation,
) -> Result<(), PersistenceError> {
    let r = &record.ratings;

    diesel::update(evaluations::table)
        .filter(evaluations::evaluation_id.eq(evaluation_id))
        .set((
            evaluations::employee_no.eq(&record.employee_no),
            evaluations::employee_name.eq(&record.employee_name),
            evaluations::event_id.eq(record.event_id),
            evaluations::program_objectives.eq(r.program_objectives.to_stored()),
            evaluations::topic_relevance.eq(r.topic_relevance.to_stored()),
            evaluations::speaker_knowledge.eq(r.speaker_knowledge.to_stored()),
            evaluations::speaker_delivery.eq(r.speaker_delivery.to_stored()),
            evaluations::materials.eq(r.materials.to_stored()),
            evaluations::venue.eq(r.venue.to_stored()),
            evaluations::time_management.eq(r.time_management.to_stored()),
            evaluations::organization.eq(r.organization.to_stored()),
            evaluations::overall_rating.eq(r.overall_rating.to_stored()),
            evaluations::session_helpful.eq(record.session_helpful.as_str()),
        ))
        .execute(conn)?;

    info!(evaluation_id, "Updated evaluation");
    Ok(())
}
}

backend_fn! {
/// Deletes an evaluation.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the evaluation does not exist.
pub fn delete_evaluation(conn: &mut _, evaluation_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(evaluations::table.filter(evaluations::evaluation_id.eq(evaluation_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Evaluation {evaluation_id} not found"
        )));
    }

    info!(evaluation_id, "Deleted evaluation");
    Ok(())
}
}
