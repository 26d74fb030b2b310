// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{
    AttendanceMode, DomainError, Rating, RatingField, Ratings, SessionHelpful, ValidationStatus,
};

#[test]
fn test_attendance_mode_parsing_is_case_insensitive() {
    assert_eq!(AttendanceMode::from_str("Onsite"), Ok(AttendanceMode::Onsite));
    assert_eq!(AttendanceMode::from_str(" virtual "), Ok(AttendanceMode::Virtual));
    assert!(matches!(
        AttendanceMode::from_str("Hybrid"),
        Err(DomainError::InvalidAttendanceMode(_))
    ));
}

#[test]
fn test_validation_status_round_trips_stored_text() {
    for status in [ValidationStatus::Registered, ValidationStatus::NotRegistered] {
        assert_eq!(ValidationStatus::from_str(status.as_str()), Ok(status));
    }
    assert_eq!(
        ValidationStatus::from_str("NotRegistered"),
        Ok(ValidationStatus::NotRegistered)
    );
}

#[test]
fn test_rating_accepts_scores_and_na() {
    assert_eq!(
        Rating::parse(RatingField::Venue, "5"),
        Ok(Rating::Score(5))
    );
    assert_eq!(
        Rating::parse(RatingField::Venue, " na "),
        Ok(Rating::NotApplicable)
    );
    assert_eq!(
        Rating::parse(RatingField::Venue, "N/A"),
        Ok(Rating::NotApplicable)
    );
}

#[test]
fn test_rating_rejects_out_of_range_values() {
    for bad in ["0", "6", "", "excellent", "-1"] {
        let result: Result<Rating, DomainError> = Rating::parse(RatingField::Materials, bad);
        assert!(
            matches!(result, Err(DomainError::InvalidRating { ref field, .. }) if field == "Materials"),
            "expected '{bad}' to be rejected"
        );
    }
}

#[test]
fn test_ratings_parse_with_reports_first_bad_field() {
    let result: Result<Ratings, DomainError> = Ratings::parse_with(|field| match field {
        RatingField::Organization => Some(String::from("9")),
        _ => Some(String::from("4")),
    });

    assert_eq!(
        result,
        Err(DomainError::InvalidRating {
            field: String::from("Organization"),
            value: String::from("9"),
        })
    );
}

#[test]
fn test_ratings_get_returns_each_field() {
    let ratings: Ratings = Ratings::parse_with(|field| {
        if field == RatingField::OverallRating {
            Some(String::from("NA"))
        } else {
            Some(String::from("3"))
        }
    })
    .unwrap();

    assert_eq!(ratings.get(RatingField::OverallRating), Rating::NotApplicable);
    assert_eq!(ratings.get(RatingField::ProgramObjectives), Rating::Score(3));
    assert_eq!(RatingField::ALL.len(), 9);
}

#[test]
fn test_session_helpful_parsing() {
    assert_eq!(SessionHelpful::from_str("YES"), Ok(SessionHelpful::Yes));
    assert_eq!(SessionHelpful::from_str("no"), Ok(SessionHelpful::No));
    assert!(SessionHelpful::from_str("sometimes").is_err());
}
