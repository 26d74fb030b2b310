// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use wellness_domain::DomainError;
use wellness_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Neither an employee number nor a name was supplied.
    #[error("Employee Name is required for walk-in records.")]
    MissingIdentity,
    /// A field holds a value outside its allowed set.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The referenced event does not exist.
    #[error("Event {reference} not found")]
    EventNotFound {
        /// The event ID, or the quoted event name.
        reference: String,
    },
    /// A record with the same identity already exists for the event.
    #[error("{description}")]
    DuplicateFound {
        /// Names the colliding identity and event.
        description: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The uploaded CSV could not be read at all.
    #[error("Invalid CSV format: {reason}")]
    InvalidCsvFormat {
        /// Why the CSV was rejected.
        reason: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Builds an `EventNotFound` for an event referenced by ID.
    #[must_use]
    pub fn event_id_not_found(event_id: i64) -> Self {
        Self::EventNotFound {
            reference: event_id.to_string(),
        }
    }

    /// Builds an `EventNotFound` for an event referenced by name.
    #[must_use]
    pub fn event_name_not_found(name: &str) -> Self {
        Self::EventNotFound {
            reference: format!("\"{name}\""),
        }
    }

    /// Builds a `ResourceNotFound` for a record referenced by ID.
    #[must_use]
    pub fn record_not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: String::from(resource_type),
            message: format!("{resource_type} {id} does not exist"),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingIdentity => ApiError::MissingIdentity,
        DomainError::InvalidAttendanceMode(_) => ApiError::InvalidInput {
            field: String::from("mode"),
            message,
        },
        DomainError::InvalidValidationStatus(_) => ApiError::InvalidInput {
            field: String::from("validation_status"),
            message,
        },
        DomainError::InvalidRating { field, .. } | DomainError::EmptyField { field } => {
            ApiError::InvalidInput { field, message }
        }
        DomainError::InvalidSessionHelpful(_) => ApiError::InvalidInput {
            field: String::from("session_helpful"),
            message,
        },
        DomainError::InvalidDate { .. } => ApiError::InvalidInput {
            field: String::from("event_date"),
            message,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Unique violations become `DuplicateFound` so that a write-time collision
/// looks the same to callers as a pre-check hit.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(msg) => ApiError::DuplicateFound {
            description: format!("Record already exists: {msg}"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::ForeignKeyViolation(msg) => ApiError::InvalidInput {
            field: String::from("event_id"),
            message: format!("Referenced event does not exist: {msg}"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}
