// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod session;


use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use wellness_api::{
    ApiError, AttendanceRequest, AttendanceResponse, DirectoryImportResult, EmployeeResponse,
    EvaluationRequest, EvaluationResponse, EventRequest, EventResponse, ImportResult, ListParams,
    ListResponse, RegistrationRequest, RegistrationResponse,
};
use wellness_domain::EntityKind;
use wellness_persistence::{ConstraintOutcome, Persistence, ReconciliationReport};

use crate::session::AdminSession;

/// Username of the admin seeded from `--admin-token`.
const SEEDED_ADMIN_USERNAME: &str = "admin";

/// Wellness Server - HTTP server for the wellness events tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "WELLNESS_DATABASE")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, env = "WELLNESS_MYSQL_URL")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// API token to grant to the `admin` account on startup
    #[arg(long, env = "WELLNESS_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,

    /// Do not run duplicate reconciliation at startup
    #[arg(long)]
    skip_reconcile: bool,

    /// Run duplicate reconciliation once and exit
    #[arg(long, conflicts_with = "skip_reconcile")]
    reconcile_only: bool,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex; handlers hold the
/// lock for one unit of work.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    /// Machine-readable error kind.
    error: String,
    /// Human-readable explanation.
    details: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    kind: &'static str,
    details: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: String::from(self.kind),
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, kind) = match &err {
            ApiError::AuthenticationFailed { .. } => {
                (StatusCode::UNAUTHORIZED, "authentication_failed")
            }
            ApiError::MissingIdentity => (StatusCode::BAD_REQUEST, "missing_identity"),
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_field_value"),
            ApiError::InvalidCsvFormat { .. } => (StatusCode::BAD_REQUEST, "invalid_csv"),
            ApiError::EventNotFound { .. } => (StatusCode::NOT_FOUND, "event_not_found"),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "record_not_found"),
            ApiError::DuplicateFound { .. } => {
                info!(error = %err, "Duplicate rejected");
                (StatusCode::CONFLICT, "duplicate_found")
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        Self {
            status,
            kind,
            details: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Query for the attendance export.
#[derive(Debug, Deserialize)]
struct ExportQuery {
    event_id: Option<i64>,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

// ============================================================================
// Events
// ============================================================================

async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
) -> Result<Json<Vec<EventResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::list_events(&mut persistence)?))
}

async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Json(request): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), HttpError> {
    info!(event_name = %request.event_name, "Handling create_event request");
    let mut persistence = app_state.persistence.lock().await;
    let response = wellness_api::create_event(&mut persistence, &request, &admin)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Path(event_id): Path<i64>,
) -> Result<Json<EventResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::get_event(&mut persistence, event_id)?))
}

async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(event_id): Path<i64>,
    Json(request): Json<EventRequest>,
) -> Result<Json<EventResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::update_event(
        &mut persistence,
        event_id,
        &request,
        &admin,
    )?))
}

async fn handle_delete_event(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(event_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    wellness_api::delete_event(&mut persistence, event_id, &admin)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Registrations
// ============================================================================

async fn handle_list_registrations(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<RegistrationResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::list_registrations(
        &mut persistence,
        &params,
    )?))
}

async fn handle_create_registration(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Json(request): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = wellness_api::create_registration(&mut persistence, &request, &admin)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_get_registration(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Path(registration_id): Path<i64>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::get_registration(
        &mut persistence,
        registration_id,
    )?))
}

async fn handle_update_registration(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(registration_id): Path<i64>,
    Json(request): Json<RegistrationRequest>,
) -> Result<Json<RegistrationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::update_registration(
        &mut persistence,
        registration_id,
        &request,
        &admin,
    )?))
}

async fn handle_delete_registration(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(registration_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    wellness_api::delete_registration(&mut persistence, registration_id, &admin)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_upload_registrations(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    body: String,
) -> Result<Json<ImportResult>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::import_records(
        &mut persistence,
        EntityKind::Registration,
        &body,
        &admin,
    )?))
}

// ============================================================================
// Attendance
// ============================================================================

async fn handle_list_attendance(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<AttendanceResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::list_attendance(&mut persistence, &params)?))
}

async fn handle_create_attendance(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Json(request): Json<AttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = wellness_api::create_attendance(&mut persistence, &request, &admin)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_get_attendance(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Path(attendance_id): Path<i64>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::get_attendance(
        &mut persistence,
        attendance_id,
    )?))
}

async fn handle_update_attendance(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(attendance_id): Path<i64>,
    Json(request): Json<AttendanceRequest>,
) -> Result<Json<AttendanceResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::update_attendance(
        &mut persistence,
        attendance_id,
        &request,
        &admin,
    )?))
}

async fn handle_delete_attendance(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(attendance_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    wellness_api::delete_attendance(&mut persistence, attendance_id, &admin)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_upload_attendance(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    body: String,
) -> Result<Json<ImportResult>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::import_records(
        &mut persistence,
        EntityKind::Attendance,
        &body,
        &admin,
    )?))
}

async fn handle_export_attendance(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Query(query): Query<ExportQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let csv_text: String = wellness_api::export_attendance(&mut persistence, query.event_id)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendance.csv\"",
            ),
        ],
        csv_text,
    )
        .into_response())
}

// ============================================================================
// Evaluations
// ============================================================================

async fn handle_list_evaluations(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<EvaluationResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::list_evaluations(&mut persistence, &params)?))
}

async fn handle_create_evaluation(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Json(request): Json<EvaluationRequest>,
) -> Result<(StatusCode, Json<EvaluationResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = wellness_api::create_evaluation(&mut persistence, &request, &admin)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_get_evaluation(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Path(evaluation_id): Path<i64>,
) -> Result<Json<EvaluationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::get_evaluation(
        &mut persistence,
        evaluation_id,
    )?))
}

async fn handle_update_evaluation(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(evaluation_id): Path<i64>,
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::update_evaluation(
        &mut persistence,
        evaluation_id,
        &request,
        &admin,
    )?))
}

async fn handle_delete_evaluation(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    Path(evaluation_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    wellness_api::delete_evaluation(&mut persistence, evaluation_id, &admin)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_upload_evaluations(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    body: String,
) -> Result<Json<ImportResult>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::import_records(
        &mut persistence,
        EntityKind::Evaluation,
        &body,
        &admin,
    )?))
}

// ============================================================================
// Employee Directory & Admin
// ============================================================================

async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(_admin): AdminSession,
    Path(employee_no): Path<String>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::get_employee(
        &mut persistence,
        &employee_no,
    )?))
}

async fn handle_upload_employees(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
    body: String,
) -> Result<Json<DirectoryImportResult>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(wellness_api::import_employees(
        &mut persistence,
        &body,
        &admin,
    )?))
}

async fn handle_reconcile(
    AxumState(app_state): AxumState<AppState>,
    AdminSession(admin): AdminSession,
) -> Json<ReconciliationReport> {
    let mut persistence = app_state.persistence.lock().await;
    let report: ReconciliationReport = wellness_api::reconcile_duplicates(&mut persistence, &admin);
    log_reconciliation(&report);
    Json(report)
}

/// Logs one line per table of a reconciliation run.
fn log_reconciliation(report: &ReconciliationReport) {
    for table in &report.tables {
        match &table.constraint {
            ConstraintOutcome::Failed(reason) => warn!(
                kind = %table.kind,
                deleted = table.duplicates_deleted,
                reason = %reason,
                "Unique index not installed"
            ),
            outcome => info!(
                kind = %table.kind,
                deleted = table.duplicates_deleted,
                normalized = table.blank_numbers_normalized,
                trimmed = table.padded_numbers_trimmed,
                constraint = ?outcome,
                "Reconciled table"
            ),
        }
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/events", get(handle_list_events).post(handle_create_event))
        .route(
            "/events/{event_id}",
            get(handle_get_event)
                .put(handle_update_event)
                .delete(handle_delete_event),
        )
        .route(
            "/registrations",
            get(handle_list_registrations).post(handle_create_registration),
        )
        .route("/registrations/upload", post(handle_upload_registrations))
        .route(
            "/registrations/{registration_id}",
            get(handle_get_registration)
                .put(handle_update_registration)
                .delete(handle_delete_registration),
        )
        .route(
            "/attendance",
            get(handle_list_attendance).post(handle_create_attendance),
        )
        .route("/attendance/upload", post(handle_upload_attendance))
        .route("/attendance/export", get(handle_export_attendance))
        .route(
            "/attendance/{attendance_id}",
            get(handle_get_attendance)
                .put(handle_update_attendance)
                .delete(handle_delete_attendance),
        )
        .route(
            "/evaluations",
            get(handle_list_evaluations).post(handle_create_evaluation),
        )
        .route("/evaluations/upload", post(handle_upload_evaluations))
        .route(
            "/evaluations/{evaluation_id}",
            get(handle_get_evaluation)
                .put(handle_update_evaluation)
                .delete(handle_delete_evaluation),
        )
        .route("/employees/upload", post(handle_upload_employees))
        .route("/employees/{employee_no}", get(handle_get_employee))
        .route("/admin/reconcile", post(handle_reconcile))
        .with_state(app_state)
}

/// Opens the configured backend.
fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    let persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)?
    } else if let Some(db_path) = &args.database {
        info!(path = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Wellness Server");

    let mut persistence: Persistence = open_persistence(&args)?;

    if let Some(token) = &args.admin_token {
        let admin_id: i64 = persistence.ensure_admin(SEEDED_ADMIN_USERNAME, token)?;
        info!(admin_id, username = SEEDED_ADMIN_USERNAME, "Admin token configured");
    }

    if args.reconcile_only {
        let report: ReconciliationReport = persistence.reconcile_duplicates();
        log_reconciliation(&report);
        return Ok(());
    }

    if args.skip_reconcile {
        info!("Skipping startup reconciliation");
    } else {
        let report: ReconciliationReport = persistence.reconcile_duplicates();
        log_reconciliation(&report);
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
