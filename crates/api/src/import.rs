// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk CSV import of attendee records and the employee directory.
//!
//! Headers are normalized once and mapped onto a fixed set of [`Column`]s, so
//! spreadsheet variants such as `Employee No.` and `employee_number` land on
//! the same field. Rows are processed strictly in file order. A row that
//! fails any check is skipped with a [`SkipCode`] and the batch continues;
//! only storage failures abort the import, and rows already written stay
//! written.

use std::collections::HashMap;
use std::str::FromStr;

use csv::StringRecord;
use tracing::{debug, info, warn};
use wellness_domain::{
    Attendance, AttendanceMode, DomainError, Employee, EntityKind, Evaluation, Event, Identity,
    RatingField, Ratings, Registration, SessionHelpful, ValidationStatus, normalize_optional,
    resolve_identity,
};
use wellness_persistence::{Persistence, PersistenceError};

use crate::auth::AuthenticatedAdmin;
use crate::duplicate_guard::{SeenIdentities, check_duplicate, map_write_error};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::AttendeeFields;
use crate::validation_status::compute_status;

/// The fixed internal schema that spreadsheet headers are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    EmployeeNo,
    EmployeeName,
    Department,
    EventName,
    Mode,
    Rating(RatingField),
    SessionHelpful,
    Age,
    Gender,
}

impl Column {
    /// Maps a normalized header onto a column, if it is one we recognize.
    #[must_use]
    pub fn from_header(normalized: &str) -> Option<Self> {
        let column: Self = match normalized {
            "employee_no" | "employee_number" | "emp_no" | "employee_id" | "emp_id" => {
                Self::EmployeeNo
            }
            "employee_name" | "name" | "emp_name" | "full_name" => Self::EmployeeName,
            "department" | "dept" => Self::Department,
            "event_name" | "event" => Self::EventName,
            "mode_of_attendance" | "mode" | "attendance_mode" => Self::Mode,
            "session_helpful" | "was_the_session_helpful" | "helpful" => Self::SessionHelpful,
            "age" => Self::Age,
            "gender" | "sex" => Self::Gender,
            other => {
                return RatingField::ALL
                    .into_iter()
                    .find(|field| field.key() == other)
                    .map(Self::Rating);
            }
        };
        Some(column)
    }

    /// The header written on export, and named in skip reasons.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::EmployeeNo => "Employee No",
            Self::EmployeeName => "Employee Name",
            Self::Department => "Department",
            Self::EventName => "Event Name",
            Self::Mode => "Mode of Attendance",
            Self::Rating(field) => field.label(),
            Self::SessionHelpful => "Session Helpful",
            Self::Age => "Age",
            Self::Gender => "Gender",
        }
    }
}

/// Normalizes a spreadsheet header for alias lookup.
///
/// Lowercases and trims, turns spaces and hyphens into underscores, drops
/// other punctuation and collapses repeated underscores.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    let mut normalized: String = String::with_capacity(header.len());
    for c in header.trim().trim_start_matches('\u{feff}').chars() {
        let mapped: Option<char> = if c.is_alphanumeric() {
            Some(c)
        } else if c.is_whitespace() || c == '-' || c == '_' {
            Some('_')
        } else {
            None
        };
        if let Some(m) = mapped {
            if m == '_' && (normalized.is_empty() || normalized.ends_with('_')) {
                continue;
            }
            normalized.extend(m.to_lowercase());
        }
    }
    while normalized.ends_with('_') {
        normalized.pop();
    }
    normalized
}

/// Machine-readable reason a row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipCode {
    EventNotFound,
    InvalidField,
    MissingColumn,
    MissingIdentity,
    DuplicateInFile,
    DuplicateInDatabase,
    MalformedRow,
}

/// One row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkippedRow {
    /// 1-based, not counting the header.
    pub row_number: usize,
    pub employee_no: Option<String>,
    pub employee_name: Option<String>,
    pub event_name: Option<String>,
    pub code: SkipCode,
    pub reason: String,
}

/// Outcome of an attendee import.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportResult {
    pub inserted: usize,
    pub skipped: usize,
    pub skip_details: Vec<SkippedRow>,
}

impl ImportResult {
    fn skip(&mut self, row: SkippedRow) {
        self.skipped += 1;
        self.skip_details.push(row);
    }
}

/// Outcome of an employee directory load.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DirectoryImportResult {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub skip_details: Vec<SkippedRow>,
}

/// A CSV record viewed through the normalized header map.
struct ImportRow<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<Column, usize>,
}

impl ImportRow<'_> {
    /// Returns the trimmed cell for a column, or `None` if absent or blank.
    fn get(&self, column: Column) -> Option<String> {
        self.columns
            .get(&column)
            .and_then(|&idx| self.record.get(idx))
            .and_then(|value| normalize_optional(Some(value)))
    }

    fn require(&self, column: Column) -> Result<String, RowError> {
        self.get(column).ok_or_else(|| missing_column(column))
    }

    /// Returns the trimmed cell for a column the header must carry.
    ///
    /// A blank cell comes back as an empty string so the field parser can
    /// reject it by name.
    fn value(&self, column: Column) -> Result<String, RowError> {
        if !self.columns.contains_key(&column) {
            return Err(missing_column(column));
        }
        Ok(self.get(column).unwrap_or_default())
    }
}

fn missing_column(column: Column) -> RowError {
    RowError::Skip(
        SkipCode::MissingColumn,
        format!("Missing required column: {}", column.label()),
    )
}

/// Why a single row did not make it in.
enum RowError {
    Skip(SkipCode, String),
    Fatal(ApiError),
}

impl From<ApiError> for RowError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DuplicateFound { description } => {
                Self::Skip(SkipCode::DuplicateInDatabase, description)
            }
            ApiError::MissingIdentity => Self::Skip(
                SkipCode::MissingIdentity,
                String::from("Employee Name required for walk-in"),
            ),
            ApiError::EventNotFound { .. } => Self::Skip(SkipCode::EventNotFound, err.to_string()),
            ApiError::InvalidInput { .. } => Self::Skip(SkipCode::InvalidField, err.to_string()),
            other => Self::Fatal(other),
        }
    }
}

impl From<DomainError> for RowError {
    fn from(err: DomainError) -> Self {
        Self::from(ApiError::from(err))
    }
}

impl From<PersistenceError> for RowError {
    fn from(err: PersistenceError) -> Self {
        Self::from(translate_persistence_error(err))
    }
}

/// Reads the header row and maps it onto known columns.
fn read_columns(
    reader: &mut csv::Reader<&[u8]>,
) -> Result<HashMap<Column, usize>, ApiError> {
    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();

    let mut columns: HashMap<Column, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        match Column::from_header(&normalize_header(header)) {
            Some(column) => {
                columns.entry(column).or_insert(idx);
            }
            None => debug!(header = %header, "Ignoring unrecognized CSV column"),
        }
    }

    if columns.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: String::from("No recognized columns in header row"),
        });
    }

    Ok(columns)
}

fn csv_reader(csv_content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_content.as_bytes())
}

/// Looks up an event by name, exact match first.
fn resolve_event(persistence: &mut Persistence, event_name: &str) -> Result<Event, RowError> {
    persistence
        .find_event_by_name(event_name)?
        .ok_or_else(|| RowError::from(ApiError::event_name_not_found(event_name)))
}

/// The per-kind fields of a row, validated before identity is resolved.
enum EntityFields {
    Registration,
    Attendance(AttendanceMode),
    Evaluation(Ratings, SessionHelpful),
}

fn validate_entity_fields(kind: EntityKind, row: &ImportRow<'_>) -> Result<EntityFields, RowError> {
    match kind {
        EntityKind::Registration => Ok(EntityFields::Registration),
        EntityKind::Attendance => {
            let mode: AttendanceMode = AttendanceMode::from_str(&row.value(Column::Mode)?)?;
            Ok(EntityFields::Attendance(mode))
        }
        EntityKind::Evaluation => {
            for field in RatingField::ALL {
                row.value(Column::Rating(field))?;
            }
            let ratings: Ratings = Ratings::parse_with(|field| row.get(Column::Rating(field)))?;
            let helpful: SessionHelpful =
                SessionHelpful::from_str(&row.value(Column::SessionHelpful)?)?;
            Ok(EntityFields::Evaluation(ratings, helpful))
        }
    }
}

/// A fully built record waiting on the duplicate checks.
enum PendingRecord {
    Registration(Registration),
    Attendance(Attendance),
    Evaluation(Evaluation),
}

/// Runs one row through the pipeline and writes it.
fn import_row(
    persistence: &mut Persistence,
    kind: EntityKind,
    row: &ImportRow<'_>,
    row_number: usize,
    seen: &mut SeenIdentities,
) -> Result<(), RowError> {
    let event_name: String = row.require(Column::EventName)?;
    let event: Event = resolve_event(persistence, &event_name)?;
    let event_id: i64 = event.event_id.ok_or_else(|| {
        RowError::Fatal(ApiError::Internal {
            message: format!("Event \"{event_name}\" has no ID"),
        })
    })?;

    let entity_fields: EntityFields = validate_entity_fields(kind, row)?;

    let department: Option<String> = match kind {
        EntityKind::Evaluation => None,
        EntityKind::Registration | EntityKind::Attendance => row.get(Column::Department),
    };
    let fields: AttendeeFields = AttendeeFields::from_raw(
        row.get(Column::EmployeeNo).as_deref(),
        row.get(Column::EmployeeName).as_deref(),
        department.as_deref(),
    )
    .fill_from_directory(persistence)?;

    let identity: Identity = resolve_identity(
        fields.employee_no.as_deref(),
        fields.employee_name.as_deref(),
    )?;

    let mut pending: PendingRecord = match entity_fields {
        EntityFields::Registration => PendingRecord::Registration(Registration {
            registration_id: None,
            employee_no: fields.employee_no,
            employee_name: fields.employee_name,
            department: fields.department,
            event_id,
        }),
        EntityFields::Attendance(mode) => PendingRecord::Attendance(Attendance {
            attendance_id: None,
            employee_name: fields.require_name()?,
            employee_no: fields.employee_no,
            department: fields.department,
            mode,
            validation_status: ValidationStatus::NotRegistered,
            event_id,
        }),
        EntityFields::Evaluation(ratings, session_helpful) => {
            PendingRecord::Evaluation(Evaluation {
                evaluation_id: None,
                employee_name: fields.require_name()?,
                employee_no: fields.employee_no,
                event_id,
                ratings,
                session_helpful,
            })
        }
    };

    if let Some(first_row) = seen.first_row(&identity, event_id) {
        return Err(RowError::Skip(
            SkipCode::DuplicateInFile,
            format!("Duplicate of row {first_row} ({identity}) in this file"),
        ));
    }

    check_duplicate(persistence, kind, &identity, &event, None)?;

    if let PendingRecord::Attendance(attendance) = &mut pending {
        attendance.validation_status = compute_status(persistence, &identity, event_id)?;
    }

    let written: Result<i64, PersistenceError> = match &pending {
        PendingRecord::Registration(registration) => {
            persistence.create_registration(registration)
        }
        PendingRecord::Attendance(attendance) => persistence.create_attendance(attendance),
        PendingRecord::Evaluation(evaluation) => persistence.create_evaluation(evaluation),
    };

    let record_id: i64 = written.map_err(|e| map_write_error(e, kind, &identity, &event))?;
    debug!(%kind, record_id, row_number, "Imported row");

    seen.record(identity, event_id, row_number);
    Ok(())
}

/// Imports attendee records of one kind from CSV text.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `kind` - Which attendee table the rows belong to
/// * `csv_content` - The raw CSV, header row first
/// * `admin` - The admin performing the upload
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the header row is unusable, or a
/// storage error that is not a uniqueness collision. Per-row problems are
/// reported in the result instead.
pub fn import_records(
    persistence: &mut Persistence,
    kind: EntityKind,
    csv_content: &str,
    admin: &AuthenticatedAdmin,
) -> Result<ImportResult, ApiError> {
    let mut reader = csv_reader(csv_content);
    let columns: HashMap<Column, usize> = read_columns(&mut reader)?;

    let mut result: ImportResult = ImportResult::default();
    let mut seen: SeenIdentities = SeenIdentities::new();

    for (idx, record) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let record: StringRecord = match record {
            Ok(record) => record,
            Err(e) => {
                result.skip(SkippedRow {
                    row_number,
                    employee_no: None,
                    employee_name: None,
                    event_name: None,
                    code: SkipCode::MalformedRow,
                    reason: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let row: ImportRow<'_> = ImportRow {
            record: &record,
            columns: &columns,
        };

        match import_row(persistence, kind, &row, row_number, &mut seen) {
            Ok(()) => result.inserted += 1,
            Err(RowError::Skip(code, reason)) => {
                debug!(%kind, row_number, ?code, reason = %reason, "Skipped import row");
                result.skip(SkippedRow {
                    row_number,
                    employee_no: row.get(Column::EmployeeNo),
                    employee_name: row.get(Column::EmployeeName),
                    event_name: row.get(Column::EventName),
                    code,
                    reason,
                });
            }
            Err(RowError::Fatal(err)) => {
                warn!(%kind, row_number, inserted = result.inserted, error = %err, "Import aborted");
                return Err(err);
            }
        }
    }

    info!(
        %kind,
        inserted = result.inserted,
        skipped = result.skipped,
        actor = %admin.username,
        "Import complete"
    );

    Ok(result)
}

fn employee_from_row(row: &ImportRow<'_>) -> Result<Employee, RowError> {
    let employee_no: String = row.require(Column::EmployeeNo)?;
    let employee_name: String = row.require(Column::EmployeeName)?;
    let age: Option<i32> = row
        .get(Column::Age)
        .map(|raw| {
            raw.parse::<i32>().map_err(|_| {
                RowError::Skip(SkipCode::InvalidField, format!("Invalid age '{raw}'"))
            })
        })
        .transpose()?;

    Ok(Employee {
        employee_no,
        employee_name,
        department: row.get(Column::Department),
        age,
        gender: row.get(Column::Gender),
    })
}

/// Loads the employee directory from CSV text, upserting by employee number.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the header row is unusable, or a
/// storage error.
pub fn import_employees(
    persistence: &mut Persistence,
    csv_content: &str,
    admin: &AuthenticatedAdmin,
) -> Result<DirectoryImportResult, ApiError> {
    let mut reader = csv_reader(csv_content);
    let columns: HashMap<Column, usize> = read_columns(&mut reader)?;

    let mut result: DirectoryImportResult = DirectoryImportResult::default();

    for (idx, record) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let skipped: SkippedRow = match record {
            Err(e) => SkippedRow {
                row_number,
                employee_no: None,
                employee_name: None,
                event_name: None,
                code: SkipCode::MalformedRow,
                reason: format!("CSV parse error: {e}"),
            },
            Ok(record) => {
                let row: ImportRow<'_> = ImportRow {
                    record: &record,
                    columns: &columns,
                };
                let outcome: Result<bool, RowError> = employee_from_row(&row).and_then(|e| {
                    persistence
                        .upsert_employee(&e)
                        .map_err(|err| RowError::Fatal(translate_persistence_error(err)))
                });
                match outcome {
                    Ok(true) => {
                        result.inserted += 1;
                        continue;
                    }
                    Ok(false) => {
                        result.updated += 1;
                        continue;
                    }
                    Err(RowError::Fatal(err)) => return Err(err),
                    Err(RowError::Skip(code, reason)) => SkippedRow {
                        row_number,
                        employee_no: row.get(Column::EmployeeNo),
                        employee_name: row.get(Column::EmployeeName),
                        event_name: None,
                        code,
                        reason,
                    },
                }
            }
        };

        result.skipped += 1;
        result.skip_details.push(skipped);
    }

    let directory_size: i64 = persistence
        .count_employees()
        .map_err(translate_persistence_error)?;

    info!(
        inserted = result.inserted,
        updated = result.updated,
        skipped = result.skipped,
        directory_size,
        actor = %admin.username,
        "Employee directory loaded"
    );

    Ok(result)
}
