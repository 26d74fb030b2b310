// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The attendee-record tables that carry an identity+event uniqueness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Pre-event signups.
    Registration,
    /// Actual presence at an event.
    Attendance,
    /// Post-event feedback.
    Evaluation,
}

impl EntityKind {
    /// All kinds, in the order reconciliation processes them.
    pub const ALL: [Self; 3] = [Self::Registration, Self::Attendance, Self::Evaluation];

    /// Returns a human-readable label for messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Registration => "Registration",
            Self::Attendance => "Attendance",
            Self::Evaluation => "Evaluation",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How an attendee took part in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceMode {
    /// Present in person.
    Onsite,
    /// Joined remotely.
    Virtual,
}

impl AttendanceMode {
    /// Converts this mode to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Onsite => "Onsite",
            Self::Virtual => "Virtual",
        }
    }
}

impl FromStr for AttendanceMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "onsite" => Ok(Self::Onsite),
            "virtual" => Ok(Self::Virtual),
            _ => Err(DomainError::InvalidAttendanceMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for AttendanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an attendee had registered for the event beforehand.
///
/// This is derived from the registrations table and denormalized onto
/// attendance rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// A registration exists for the attendee's employee number and event.
    Registered,
    /// Walk-in, or no matching registration.
    NotRegistered,
}

impl ValidationStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "Registered",
            Self::NotRegistered => "Not Registered",
        }
    }
}

impl FromStr for ValidationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "registered" => Ok(Self::Registered),
            "not registered" | "notregistered" | "not_registered" => Ok(Self::NotRegistered),
            _ => Err(DomainError::InvalidValidationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single evaluation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// A score from 1 to 5.
    Score(u8),
    /// The respondent marked the question as not applicable.
    NotApplicable,
}

impl Rating {
    /// Parses a rating for the named field.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` if the value is not `1`-`5` or `NA`.
    pub fn parse(field: RatingField, value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.eq_ignore_ascii_case("na") || trimmed.eq_ignore_ascii_case("n/a") {
            return Ok(Self::NotApplicable);
        }

        match trimmed.parse::<u8>() {
            Ok(score) if (1..=5).contains(&score) => Ok(Self::Score(score)),
            _ => Err(DomainError::InvalidRating {
                field: field.label().to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Converts this rating to its stored string representation.
    #[must_use]
    pub fn to_stored(self) -> String {
        match self {
            Self::Score(score) => score.to_string(),
            Self::NotApplicable => String::from("NA"),
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_stored())
    }
}

/// The nine rated questions on an evaluation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingField {
    ProgramObjectives,
    TopicRelevance,
    SpeakerKnowledge,
    SpeakerDelivery,
    Materials,
    Venue,
    TimeManagement,
    Organization,
    OverallRating,
}

impl RatingField {
    /// All rating fields in form order.
    pub const ALL: [Self; 9] = [
        Self::ProgramObjectives,
        Self::TopicRelevance,
        Self::SpeakerKnowledge,
        Self::SpeakerDelivery,
        Self::Materials,
        Self::Venue,
        Self::TimeManagement,
        Self::Organization,
        Self::OverallRating,
    ];

    /// The snake_case key used for storage columns and JSON fields.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ProgramObjectives => "program_objectives",
            Self::TopicRelevance => "topic_relevance",
            Self::SpeakerKnowledge => "speaker_knowledge",
            Self::SpeakerDelivery => "speaker_delivery",
            Self::Materials => "materials",
            Self::Venue => "venue",
            Self::TimeManagement => "time_management",
            Self::Organization => "organization",
            Self::OverallRating => "overall_rating",
        }
    }

    /// The spreadsheet column header.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ProgramObjectives => "Program Objectives",
            Self::TopicRelevance => "Topic Relevance",
            Self::SpeakerKnowledge => "Speaker Knowledge",
            Self::SpeakerDelivery => "Speaker Delivery",
            Self::Materials => "Materials",
            Self::Venue => "Venue",
            Self::TimeManagement => "Time Management",
            Self::Organization => "Organization",
            Self::OverallRating => "Overall Rating",
        }
    }
}

/// The full set of ratings on one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub program_objectives: Rating,
    pub topic_relevance: Rating,
    pub speaker_knowledge: Rating,
    pub speaker_delivery: Rating,
    pub materials: Rating,
    pub venue: Rating,
    pub time_management: Rating,
    pub organization: Rating,
    pub overall_rating: Rating,
}

impl Ratings {
    /// Builds a rating set by parsing each field's raw value.
    ///
    /// `lookup` is called once per field in form order; `None` is treated as
    /// an empty (and therefore invalid) value.
    ///
    /// # Errors
    ///
    /// Returns the first `DomainError::InvalidRating` encountered.
    pub fn parse_with<F>(mut lookup: F) -> Result<Self, DomainError>
    where
        F: FnMut(RatingField) -> Option<String>,
    {
        let mut parse = |field: RatingField| -> Result<Rating, DomainError> {
            Rating::parse(field, &lookup(field).unwrap_or_default())
        };

        Ok(Self {
            program_objectives: parse(RatingField::ProgramObjectives)?,
            topic_relevance: parse(RatingField::TopicRelevance)?,
            speaker_knowledge: parse(RatingField::SpeakerKnowledge)?,
            speaker_delivery: parse(RatingField::SpeakerDelivery)?,
            materials: parse(RatingField::Materials)?,
            venue: parse(RatingField::Venue)?,
            time_management: parse(RatingField::TimeManagement)?,
            organization: parse(RatingField::Organization)?,
            overall_rating: parse(RatingField::OverallRating)?,
        })
    }

    /// Returns the rating for one field.
    #[must_use]
    pub const fn get(&self, field: RatingField) -> Rating {
        match field {
            RatingField::ProgramObjectives => self.program_objectives,
            RatingField::TopicRelevance => self.topic_relevance,
            RatingField::SpeakerKnowledge => self.speaker_knowledge,
            RatingField::SpeakerDelivery => self.speaker_delivery,
            RatingField::Materials => self.materials,
            RatingField::Venue => self.venue,
            RatingField::TimeManagement => self.time_management,
            RatingField::Organization => self.organization,
            RatingField::OverallRating => self.overall_rating,
        }
    }
}

/// Whether the respondent found the session helpful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionHelpful {
    Yes,
    No,
}

impl SessionHelpful {
    /// Converts this flag to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl FromStr for SessionHelpful {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(DomainError::InvalidSessionHelpful(s.to_string())),
        }
    }
}

impl std::fmt::Display for SessionHelpful {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
