// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data transfer types returned by the persistence layer.

use serde::{Deserialize, Serialize};
use wellness_domain::EntityKind;

/// Default page size for list queries.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Largest page size a list query may request.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Admin data returned from token lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminData {
    pub admin_id: i64,
    pub username: String,
}

/// An existing record that carries the same identity for the same event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// The primary key of the conflicting record.
    pub record_id: i64,
    pub employee_no: Option<String>,
    pub employee_name: Option<String>,
    pub event_id: i64,
    pub kind: EntityKind,
}

/// Filter and pagination for attendee list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Restrict results to one event.
    pub event_id: Option<i64>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            event_id: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl ListQuery {
    /// Builds a query from optional caller input, applying defaults and bounds.
    #[must_use]
    pub fn new(event_id: Option<i64>, limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            event_id,
            limit: limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

/// One page of a list query together with the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Result of installing the `(employee_no, event_id)` unique index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ConstraintOutcome {
    Installed,
    AlreadyPresent,
    Failed(String),
}

/// Reconciliation outcome for a single attendee table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReconciliation {
    pub kind: EntityKind,
    /// Rows whose blank employee number was rewritten to NULL.
    pub blank_numbers_normalized: usize,
    /// Rows whose padded employee number was rewritten to its trimmed form.
    pub padded_numbers_trimmed: usize,
    /// Later duplicates removed in favour of the lowest id.
    pub duplicates_deleted: usize,
    pub constraint: ConstraintOutcome,
}

/// Outcome of one reconciliation run over all attendee tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub tables: Vec<TableReconciliation>,
}

impl ReconciliationReport {
    /// Total rows deleted across all tables.
    #[must_use]
    pub fn total_deleted(&self) -> usize {
        self.tables.iter().map(|t| t.duplicates_deleted).sum()
    }

    /// Returns the entry for one table, if it was processed.
    #[must_use]
    pub fn table(&self, kind: EntityKind) -> Option<&TableReconciliation> {
        self.tables.iter().find(|t| t.kind == kind)
    }
}
