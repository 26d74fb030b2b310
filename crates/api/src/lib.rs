// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the wellness events tracker.
//!
//! Handlers here are transport-agnostic: they take the persistence layer and
//! typed requests, enforce identity resolution and duplicate prevention, and
//! return typed responses or an [`ApiError`]. The server crate maps these
//! onto HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod duplicate_guard;
mod error;
mod export;
mod handlers;
mod import;
mod request_response;
mod validation_status;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedAdmin, AuthenticationService};
pub use duplicate_guard::{SeenIdentities, check_duplicate, describe_duplicate, map_write_error};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use export::export_attendance;
pub use handlers::{
    create_attendance, create_evaluation, create_event, create_registration, delete_attendance,
    delete_evaluation, delete_event, delete_registration, get_attendance, get_employee,
    get_evaluation, get_event, get_registration, list_attendance, list_evaluations, list_events,
    list_registrations, reconcile_duplicates, update_attendance, update_evaluation, update_event,
    update_registration,
};
pub use import::{
    Column, DirectoryImportResult, ImportResult, SkipCode, SkippedRow, import_employees,
    import_records, normalize_header,
};
pub use request_response::{
    AttendanceRequest, AttendanceResponse, EmployeeResponse, EvaluationRequest,
    EvaluationResponse, EventRequest, EventResponse, ListParams, ListResponse, RatingValue,
    RegistrationRequest, RegistrationResponse,
};
pub use validation_status::compute_status;
