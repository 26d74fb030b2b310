// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod backend_validation_tests;
mod event_tests;
mod initialization_tests;
mod reconciliation_tests;

use time::{Date, Month};
use wellness_domain::{
    Attendance, AttendanceMode, Evaluation, Event, Rating, Ratings, Registration, SessionHelpful,
    ValidationStatus,
};

use crate::Persistence;

/// Returns the date used for test events (March 14, 2026).
pub fn create_test_date() -> Date {
    Date::from_calendar_date(2026, Month::March, 14).expect("Valid test date")
}

/// Creates a seminar event with the given name and returns its ID.
pub fn create_test_event(persistence: &mut Persistence, name: &str) -> i64 {
    let event = Event::new(
        String::from("Seminar"),
        String::from(name),
        create_test_date(),
    );
    persistence
        .create_event(&event)
        .expect("Failed to create test event")
}

pub fn registration(
    employee_no: Option<&str>,
    employee_name: Option<&str>,
    event_id: i64,
) -> Registration {
    Registration {
        registration_id: None,
        employee_no: employee_no.map(String::from),
        employee_name: employee_name.map(String::from),
        department: None,
        event_id,
    }
}

pub fn attendance(employee_no: Option<&str>, employee_name: &str, event_id: i64) -> Attendance {
    Attendance {
        attendance_id: None,
        employee_no: employee_no.map(String::from),
        employee_name: String::from(employee_name),
        department: Some(String::from("Finance")),
        mode: AttendanceMode::Onsite,
        validation_status: ValidationStatus::NotRegistered,
        event_id,
    }
}

pub fn evaluation(employee_no: Option<&str>, employee_name: &str, event_id: i64) -> Evaluation {
    Evaluation {
        evaluation_id: None,
        employee_no: employee_no.map(String::from),
        employee_name: String::from(employee_name),
        event_id,
        ratings: Ratings {
            program_objectives: Rating::Score(5),
            topic_relevance: Rating::Score(4),
            speaker_knowledge: Rating::Score(5),
            speaker_delivery: Rating::Score(3),
            materials: Rating::NotApplicable,
            venue: Rating::Score(4),
            time_management: Rating::Score(2),
            organization: Rating::Score(4),
            overall_rating: Rating::Score(4),
        },
        session_helpful: SessionHelpful::Yes,
    }
}
