// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Most mutations use Diesel DSL and are backend-agnostic, with minimal use of
//! backend-specific helpers (e.g., `last_insert_rowid()` for `SQLite`).
//!
//! ## Module Organization
//!
//! - `events` — Event create/update/delete
//! - `employees` — Employee directory upserts
//! - `registrations`, `attendance`, `evaluations` — Attendee record writes
//! - `reconciliation` — Legacy duplicate cleanup and unique index installation
//! - `admins` — API token seeding
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported from
//! the `backend` module. All other code uses Diesel DSL, except the
//! `CREATE UNIQUE INDEX` statement in `reconciliation`.

pub mod admins;
pub mod attendance;
pub mod employees;
pub mod evaluations;
pub mod events;
pub mod reconciliation;
pub mod registrations;

pub use admins::{ensure_admin_mysql, ensure_admin_sqlite};
pub use attendance::{
    create_attendance_mysql, create_attendance_sqlite, delete_attendance_mysql,
    delete_attendance_sqlite, update_attendance_mysql, update_attendance_sqlite,
};
pub use employees::{upsert_employee_mysql, upsert_employee_sqlite};
pub use evaluations::{
    create_evaluation_mysql, create_evaluation_sqlite, delete_evaluation_mysql,
    delete_evaluation_sqlite, update_evaluation_mysql, update_evaluation_sqlite,
};
pub use events::{
    create_event_mysql, create_event_sqlite, delete_event_mysql, delete_event_sqlite,
    update_event_mysql, update_event_sqlite,
};
pub use reconciliation::{reconcile_table_mysql, reconcile_table_sqlite};
pub use registrations::{
    create_registration_mysql, create_registration_sqlite, delete_registration_mysql,
    delete_registration_sqlite, update_registration_mysql, update_registration_sqlite,
};
