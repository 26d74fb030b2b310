// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of attendance.
//!
//! The header row uses the same labels the importer recognizes, so an export
//! can be edited and uploaded again.

use std::collections::HashMap;

use tracing::info;
use wellness_domain::{Attendance, Event};
use wellness_persistence::Persistence;

use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::load_event;
use crate::import::Column;

const VALIDATION_STATUS_HEADER: &str = "Validation Status";

const EXPORT_COLUMNS: [Column; 5] = [
    Column::EmployeeNo,
    Column::EmployeeName,
    Column::Department,
    Column::EventName,
    Column::Mode,
];

fn csv_error(e: &impl std::fmt::Display) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {e}"),
    }
}

/// Exports attendance as CSV text, optionally for a single event.
///
/// # Errors
///
/// Returns `ApiError::EventNotFound` if `event_id` names a missing event, or
/// an internal error if the query or CSV encoding fails.
pub fn export_attendance(
    persistence: &mut Persistence,
    event_id: Option<i64>,
) -> Result<String, ApiError> {
    if let Some(event_id) = event_id {
        load_event(persistence, event_id)?;
    }

    let event_names: HashMap<i64, String> = persistence
        .list_events()
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter_map(|event: Event| event.event_id.map(|id| (id, event.event_name)))
        .collect();

    let records: Vec<Attendance> = persistence
        .list_all_attendance(event_id)
        .map_err(translate_persistence_error)?;

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = EXPORT_COLUMNS.iter().map(Column::label).collect();
    header.push(VALIDATION_STATUS_HEADER);
    writer.write_record(&header).map_err(|e| csv_error(&e))?;

    for record in &records {
        writer
            .write_record([
                record.employee_no.as_deref().unwrap_or_default(),
                record.employee_name.as_str(),
                record.department.as_deref().unwrap_or_default(),
                event_names
                    .get(&record.event_id)
                    .map_or("", String::as_str),
                record.mode.as_str(),
                record.validation_status.as_str(),
            ])
            .map_err(|e| csv_error(&e))?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| csv_error(&e))?;
    let csv_text: String = String::from_utf8(bytes).map_err(|e| csv_error(&e))?;

    info!(?event_id, rows = records.len(), "Exported attendance");
    Ok(csv_text)
}
