// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod duplicate_guard_tests;
mod record_tests;

use wellness_persistence::Persistence;

use crate::{
    AttendanceRequest, AuthenticatedAdmin, EvaluationRequest, EventRequest, RatingValue,
    RegistrationRequest, create_event,
};

pub fn create_test_admin() -> AuthenticatedAdmin {
    AuthenticatedAdmin {
        admin_id: 1,
        username: String::from("admin"),
    }
}

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates a seminar on 2026-03-14 and returns its ID.
pub fn create_test_event(persistence: &mut Persistence, name: &str) -> i64 {
    let request = EventRequest {
        event_type: String::from("Seminar"),
        event_name: String::from(name),
        event_date: String::from("2026-03-14"),
    };
    create_event(persistence, &request, &create_test_admin())
        .expect("Failed to create test event")
        .event_id
}

pub fn registration_request(
    employee_no: Option<&str>,
    employee_name: Option<&str>,
    event_id: i64,
) -> RegistrationRequest {
    RegistrationRequest {
        employee_no: employee_no.map(String::from),
        employee_name: employee_name.map(String::from),
        department: Some(String::from("Finance")),
        event_id,
    }
}

pub fn attendance_request(
    employee_no: Option<&str>,
    employee_name: Option<&str>,
    event_id: i64,
) -> AttendanceRequest {
    AttendanceRequest {
        employee_no: employee_no.map(String::from),
        employee_name: employee_name.map(String::from),
        department: Some(String::from("Finance")),
        mode: String::from("Onsite"),
        event_id,
    }
}

pub fn evaluation_request(
    employee_no: Option<&str>,
    employee_name: Option<&str>,
    event_id: i64,
) -> EvaluationRequest {
    EvaluationRequest {
        employee_no: employee_no.map(String::from),
        employee_name: employee_name.map(String::from),
        event_id,
        program_objectives: RatingValue::Number(5),
        topic_relevance: RatingValue::Number(4),
        speaker_knowledge: RatingValue::Number(5),
        speaker_delivery: RatingValue::Text(String::from("3")),
        materials: RatingValue::Text(String::from("NA")),
        venue: RatingValue::Number(4),
        time_management: RatingValue::Number(2),
        organization: RatingValue::Number(4),
        overall_rating: RatingValue::Number(4),
        session_helpful: String::from("Yes"),
    }
}
