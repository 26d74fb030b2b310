// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duplicate prevention for attendee records.
//!
//! Two checks guard every write: an in-batch check against identities
//! accepted earlier in the same import ([`SeenIdentities`]) and a storage
//! check ([`check_duplicate`]). The storage check is not atomic with the
//! write, so the unique index installed by reconciliation is the backstop;
//! [`map_write_error`] folds its violations into the same `DuplicateFound`.

use std::collections::HashMap;

use tracing::info;
use wellness_domain::{EntityKind, Event, Identity};
use wellness_persistence::{DuplicateMatch, Persistence, PersistenceError};

use crate::error::{ApiError, translate_persistence_error};

/// Describes a collision for the caller.
#[must_use]
pub fn describe_duplicate(kind: EntityKind, identity: &Identity, event: &Event) -> String {
    format!(
        "{kind} already exists for {identity} at event \"{}\"",
        event.event_name
    )
}

/// Checks storage for a record of `kind` with the same identity and event.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `kind` - The attendee table to check
/// * `identity` - The resolved identity of the incoming record
/// * `event` - The event the record belongs to (must be persisted)
/// * `exclude_id` - The record being updated, so it does not collide with itself
///
/// # Errors
///
/// Returns `ApiError::DuplicateFound` on a collision, or `ApiError::Internal`
/// if the lookup fails.
pub fn check_duplicate(
    persistence: &mut Persistence,
    kind: EntityKind,
    identity: &Identity,
    event: &Event,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    let event_id: i64 = event.event_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Duplicate check requires a persisted event"),
    })?;

    let existing: Option<DuplicateMatch> = persistence
        .find_duplicate(kind, identity, event_id, exclude_id)
        .map_err(translate_persistence_error)?;

    match existing {
        Some(found) => {
            info!(
                %kind,
                %identity,
                event_id,
                existing_id = found.record_id,
                "Rejected duplicate record"
            );
            Err(ApiError::DuplicateFound {
                description: format!(
                    "{} (record {})",
                    describe_duplicate(kind, identity, event),
                    found.record_id
                ),
            })
        }
        None => Ok(()),
    }
}

/// Maps a failed attendee write, turning unique violations into `DuplicateFound`.
#[must_use]
pub fn map_write_error(
    err: PersistenceError,
    kind: EntityKind,
    identity: &Identity,
    event: &Event,
) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => {
            info!(%kind, %identity, "Unique index rejected duplicate record");
            ApiError::DuplicateFound {
                description: describe_duplicate(kind, identity, event),
            }
        }
        other => translate_persistence_error(other),
    }
}

/// Identities accepted earlier in one import, keyed by `(identity, event_id)`.
///
/// Lives for a single import call only.
#[derive(Debug, Default)]
pub struct SeenIdentities {
    rows: HashMap<(Identity, i64), usize>,
}

impl SeenIdentities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the row number that first used this identity for the event.
    #[must_use]
    pub fn first_row(&self, identity: &Identity, event_id: i64) -> Option<usize> {
        self.rows.get(&(identity.clone(), event_id)).copied()
    }

    /// Records an identity as accepted at `row_number`.
    pub fn record(&mut self, identity: Identity, event_id: i64, row_number: usize) {
        self.rows.entry((identity, event_id)).or_insert(row_number);
    }
}
