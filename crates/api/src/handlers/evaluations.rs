// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use tracing::info;
use wellness_domain::{
    EntityKind, Evaluation, Event, Identity, Ratings, SessionHelpful, resolve_identity,
};
use wellness_persistence::{Page, Persistence, PersistenceError};

use crate::auth::AuthenticatedAdmin;
use crate::duplicate_guard::{check_duplicate, map_write_error};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{AttendeeFields, load_event};
use crate::request_response::{EvaluationRequest, EvaluationResponse, ListParams, ListResponse};

fn prepare_evaluation(
    persistence: &mut Persistence,
    request: &EvaluationRequest,
    exclude_id: Option<i64>,
) -> Result<(Evaluation, Identity, Event), ApiError> {
    let event: Event = load_event(persistence, request.event_id)?;
    let ratings: Ratings = Ratings::parse_with(|field| Some(request.rating(field).as_text()))?;
    let session_helpful: SessionHelpful = SessionHelpful::from_str(&request.session_helpful)?;

    // Evaluations carry no department, but the directory still supplies the name.
    let fields: AttendeeFields = AttendeeFields::from_raw(
        request.employee_no.as_deref(),
        request.employee_name.as_deref(),
        None,
    )
    .fill_from_directory(persistence)?;

    let identity: Identity = resolve_identity(
        fields.employee_no.as_deref(),
        fields.employee_name.as_deref(),
    )?;
    let employee_name: String = fields.require_name()?;

    check_duplicate(
        persistence,
        EntityKind::Evaluation,
        &identity,
        &event,
        exclude_id,
    )?;

    let evaluation: Evaluation = Evaluation {
        evaluation_id: exclude_id,
        employee_no: fields.employee_no,
        employee_name,
        event_id: request.event_id,
        ratings,
        session_helpful,
    };

    Ok((evaluation, identity, event))
}

/// Submits an evaluation.
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - A rating is not 1-5 or NA, or session helpful is not Yes or No
/// - No name was given and none is in the directory
/// - An evaluation with the same identity already exists for the event
pub fn create_evaluation(
    persistence: &mut Persistence,
    request: &EvaluationRequest,
    admin: &AuthenticatedAdmin,
) -> Result<EvaluationResponse, ApiError> {
    let (mut evaluation, identity, event) = prepare_evaluation(persistence, request, None)?;

    let evaluation_id: i64 = persistence
        .create_evaluation(&evaluation)
        .map_err(|e| map_write_error(e, EntityKind::Evaluation, &identity, &event))?;
    evaluation.evaluation_id = Some(evaluation_id);

    info!(
        evaluation_id,
        %identity,
        event_id = evaluation.event_id,
        actor = %admin.username,
        "Created evaluation"
    );

    EvaluationResponse::from_record(evaluation).ok_or_else(missing_id)
}

/// Retrieves an evaluation.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the evaluation does not exist.
pub fn get_evaluation(
    persistence: &mut Persistence,
    evaluation_id: i64,
) -> Result<EvaluationResponse, ApiError> {
    persistence
        .get_evaluation(evaluation_id)
        .map_err(translate_persistence_error)?
        .and_then(EvaluationResponse::from_record)
        .ok_or_else(|| ApiError::record_not_found("Evaluation", evaluation_id))
}

/// Replaces an evaluation's fields.
///
/// # Errors
///
/// Returns an error if the evaluation does not exist, a field is invalid, or
/// the update would collide with another evaluation.
pub fn update_evaluation(
    persistence: &mut Persistence,
    evaluation_id: i64,
    request: &EvaluationRequest,
    admin: &AuthenticatedAdmin,
) -> Result<EvaluationResponse, ApiError> {
    persistence
        .get_evaluation(evaluation_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::record_not_found("Evaluation", evaluation_id))?;

    let (evaluation, identity, event) =
        prepare_evaluation(persistence, request, Some(evaluation_id))?;

    persistence
        .update_evaluation(evaluation_id, &evaluation)
        .map_err(|e| map_write_error(e, EntityKind::Evaluation, &identity, &event))?;

    info!(evaluation_id, %identity, actor = %admin.username, "Updated evaluation");

    EvaluationResponse::from_record(evaluation).ok_or_else(missing_id)
}

/// Deletes an evaluation.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the evaluation does not exist.
pub fn delete_evaluation(
    persistence: &mut Persistence,
    evaluation_id: i64,
    admin: &AuthenticatedAdmin,
) -> Result<(), ApiError> {
    persistence
        .delete_evaluation(evaluation_id)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::record_not_found("Evaluation", evaluation_id),
            other => translate_persistence_error(other),
        })?;

    info!(evaluation_id, actor = %admin.username, "Deleted evaluation");
    Ok(())
}

/// Lists evaluations with pagination and an optional event filter.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_evaluations(
    persistence: &mut Persistence,
    params: &ListParams,
) -> Result<ListResponse<EvaluationResponse>, ApiError> {
    let page: Page<Evaluation> = persistence
        .list_evaluations(&params.to_query())
        .map_err(translate_persistence_error)?;

    Ok(ListResponse::from_page(page, EvaluationResponse::from_record))
}

fn missing_id() -> ApiError {
    ApiError::Internal {
        message: String::from("Persisted evaluation has no ID"),
    }
}
