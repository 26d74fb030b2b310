// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use wellness_domain::{
    Attendance, DomainError, Employee, Evaluation, Event, RatingField, Registration,
    format_event_date,
};
use wellness_persistence::{ListQuery, Page};

/// API request to create or replace an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventRequest {
    pub event_type: String,
    pub event_name: String,
    /// ISO 8601 calendar date (`YYYY-MM-DD`).
    pub event_date: String,
}

/// API response describing one event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventResponse {
    pub event_id: i64,
    pub event_type: String,
    pub event_name: String,
    pub event_date: String,
}

impl EventResponse {
    /// Builds the response for a persisted event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event date cannot be formatted.
    pub fn from_event(event: &Event, event_id: i64) -> Result<Self, DomainError> {
        Ok(Self {
            event_id,
            event_type: event.event_type.clone(),
            event_name: event.event_name.clone(),
            event_date: format_event_date(event.event_date)?,
        })
    }
}

/// Query parameters accepted by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListParams {
    pub event_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Converts to a bounded persistence query.
    #[must_use]
    pub fn to_query(self) -> ListQuery {
        ListQuery::new(self.event_id, self.limit, self.offset)
    }
}

/// API response for a paginated list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    /// Total matching records, ignoring pagination.
    pub total: i64,
}

impl<T> ListResponse<T> {
    /// Converts a storage page, dropping records that have no ID.
    #[must_use]
    pub fn from_page<R>(page: Page<R>, convert: impl FnMut(R) -> Option<T>) -> Self {
        Self {
            items: page.items.into_iter().filter_map(convert).collect(),
            total: page.total,
        }
    }
}

/// API request to create or replace a registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub employee_no: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub event_id: i64,
}

/// API response describing one registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegistrationResponse {
    pub registration_id: i64,
    pub employee_no: Option<String>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub event_id: i64,
}

impl RegistrationResponse {
    /// Returns `None` for a record that was never persisted.
    #[must_use]
    pub fn from_record(record: Registration) -> Option<Self> {
        Some(Self {
            registration_id: record.registration_id?,
            employee_no: record.employee_no,
            employee_name: record.employee_name,
            department: record.department,
            event_id: record.event_id,
        })
    }
}

/// API request to create or replace an attendance record.
///
/// The validation status is derived and cannot be supplied.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttendanceRequest {
    #[serde(default)]
    pub employee_no: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// `Onsite` or `Virtual`.
    pub mode: String,
    pub event_id: i64,
}

/// API response describing one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttendanceResponse {
    pub attendance_id: i64,
    pub employee_no: Option<String>,
    pub employee_name: String,
    pub department: Option<String>,
    pub mode: String,
    pub validation_status: String,
    pub event_id: i64,
}

impl AttendanceResponse {
    /// Returns `None` for a record that was never persisted.
    #[must_use]
    pub fn from_record(record: Attendance) -> Option<Self> {
        Some(Self {
            attendance_id: record.attendance_id?,
            employee_no: record.employee_no,
            employee_name: record.employee_name,
            department: record.department,
            mode: record.mode.to_string(),
            validation_status: record.validation_status.to_string(),
            event_id: record.event_id,
        })
    }
}

/// A rating as submitted: either a JSON number or text such as `"NA"`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RatingValue {
    Number(i64),
    Text(String),
}

impl RatingValue {
    /// Returns the value as text for parsing.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// API request to create or replace an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub employee_no: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub event_id: i64,
    pub program_objectives: RatingValue,
    pub topic_relevance: RatingValue,
    pub speaker_knowledge: RatingValue,
    pub speaker_delivery: RatingValue,
    pub materials: RatingValue,
    pub venue: RatingValue,
    pub time_management: RatingValue,
    pub organization: RatingValue,
    pub overall_rating: RatingValue,
    /// `Yes` or `No`.
    pub session_helpful: String,
}

impl EvaluationRequest {
    /// Returns the submitted value for one rating field.
    #[must_use]
    pub const fn rating(&self, field: RatingField) -> &RatingValue {
        match field {
            RatingField::ProgramObjectives => &self.program_objectives,
            RatingField::TopicRelevance => &self.topic_relevance,
            RatingField::SpeakerKnowledge => &self.speaker_knowledge,
            RatingField::SpeakerDelivery => &self.speaker_delivery,
            RatingField::Materials => &self.materials,
            RatingField::Venue => &self.venue,
            RatingField::TimeManagement => &self.time_management,
            RatingField::Organization => &self.organization,
            RatingField::OverallRating => &self.overall_rating,
        }
    }
}

/// API response describing one evaluation. Ratings are `"1"`..`"5"` or `"NA"`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationResponse {
    pub evaluation_id: i64,
    pub employee_no: Option<String>,
    pub employee_name: String,
    pub event_id: i64,
    pub program_objectives: String,
    pub topic_relevance: String,
    pub speaker_knowledge: String,
    pub speaker_delivery: String,
    pub materials: String,
    pub venue: String,
    pub time_management: String,
    pub organization: String,
    pub overall_rating: String,
    pub session_helpful: String,
}

impl EvaluationResponse {
    /// Returns `None` for a record that was never persisted.
    #[must_use]
    pub fn from_record(record: Evaluation) -> Option<Self> {
        let ratings = record.ratings;
        let stored = |field: RatingField| -> String { ratings.get(field).to_stored() };
        Some(Self {
            evaluation_id: record.evaluation_id?,
            program_objectives: stored(RatingField::ProgramObjectives),
            topic_relevance: stored(RatingField::TopicRelevance),
            speaker_knowledge: stored(RatingField::SpeakerKnowledge),
            speaker_delivery: stored(RatingField::SpeakerDelivery),
            materials: stored(RatingField::Materials),
            venue: stored(RatingField::Venue),
            time_management: stored(RatingField::TimeManagement),
            organization: stored(RatingField::Organization),
            overall_rating: stored(RatingField::OverallRating),
            session_helpful: record.session_helpful.to_string(),
            employee_no: record.employee_no,
            employee_name: record.employee_name,
            event_id: record.event_id,
        })
    }
}

/// API response describing one directory entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeResponse {
    pub employee_no: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            employee_no: employee.employee_no,
            employee_name: employee.employee_name,
            department: employee.department,
            age: employee.age,
            gender: employee.gender,
        }
    }
}
