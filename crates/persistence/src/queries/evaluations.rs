// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use wellness_domain::{Evaluation, Rating, RatingField, Ratings};

use crate::data_models::{ListQuery, Page};
use crate::diesel_schema::evaluations;
use crate::error::PersistenceError;

/// Diesel Queryable struct for evaluation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = evaluations)]
struct EvaluationRow {
    evaluation_id: i64,
    employee_no: Option<String>,
    employee_name: String,
    event_id: i64,
    program_objectives: String,
    topic_relevance: String,
    speaker_knowledge: String,
    speaker_delivery: String,
    materials: String,
    venue: String,
    time_management: String,
    organization: String,
    overall_rating: String,
    session_helpful: String,
}

impl EvaluationRow {
    fn into_evaluation(self) -> Result<Evaluation, PersistenceError> {
        let ratings = Ratings {
            program_objectives: Rating::parse(
                RatingField::ProgramObjectives,
                &self.program_objectives,
            )?,
            topic_relevance: Rating::parse(RatingField::TopicRelevance, &self.topic_relevance)?,
            speaker_knowledge: Rating::parse(
                RatingField::SpeakerKnowledge,
                &self.speaker_knowledge,
            )?,
            speaker_delivery: Rating::parse(RatingField::SpeakerDelivery, &self.speaker_delivery)?,
            materials: Rating::parse(RatingField::Materials, &self.materials)?,
            venue: Rating::parse(RatingField::Venue, &self.venue)?,
            time_management: Rating::parse(RatingField::TimeManagement, &self.time_management)?,
            organization: Rating::parse(RatingField::Organization, &self.organization)?,
            overall_rating: Rating::parse(RatingField::OverallRating, &self.overall_rating)?,
        };

        Ok(Evaluation {
            evaluation_id: Some(self.evaluation_id),
            employee_no: self.employee_no,
            employee_name: self.employee_name,
            event_id: self.event_id,
            ratings,
            session_helpful: self.session_helpful.parse()?,
        })
    }
}

backend_fn! {
/// Retrieves an evaluation by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is invalid.
pub fn get_evaluation(
    conn: &mut _,
    evaluation_id: i64,
) -> Result<Option<Evaluation>, PersistenceError> {
    evaluations::table
        .filter(evaluations::evaluation_id.eq(evaluation_id))
        .select(EvaluationRow::as_select())
        .first::<EvaluationRow>(conn)
        .optional()?
        .map(EvaluationRow::into_evaluation)
        .transpose()
}
}

backend_fn! {
/// Lists evaluations ordered by ID, with the unpaginated total.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is invalid.
pub fn list_evaluations(
    conn: &mut _,
    query: &ListQuery,
) -> Result<Page<Evaluation>, PersistenceError> {
    let mut count_query = evaluations::table.into_boxed();
    let mut items_query = evaluations::table.into_boxed();

    if let Some(event_id) = query.event_id {
        count_query = count_query.filter(evaluations::event_id.eq(event_id));
        items_query = items_query.filter(evaluations::event_id.eq(event_id));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<EvaluationRow> = items_query
        .order(evaluations::evaluation_id.asc())
        .limit(query.limit)
        .offset(query.offset)
        .select(EvaluationRow::as_select())
        .load(conn)?;

    Ok(Page {
        items: rows
            .into_iter()
            .map(EvaluationRow::into_evaluation)
            .collect::<Result<Vec<_>, _>>()?,
        total,
    })
}
}
