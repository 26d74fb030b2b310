// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `events` — Event lookup by ID and by name
//! - `employees` — Employee directory lookups
//! - `registrations`, `attendance`, `evaluations` — Attendee record reads
//! - `duplicates` — Identity-based duplicate lookup
//! - `admins` — API token lookups
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic versions:
//! - Functions suffixed with `_sqlite` for `SQLite`
//! - Functions suffixed with `_mysql` for `MySQL`/`MariaDB`
//!
//! The `Persistence` adapter in `lib.rs` dispatches to the appropriate version
//! based on the active backend connection.

pub mod admins;
pub mod attendance;
pub mod duplicates;
pub mod employees;
pub mod evaluations;
pub mod events;
pub mod registrations;

pub use admins::{find_admin_by_token_mysql, find_admin_by_token_sqlite};
pub use attendance::{
    get_attendance_mysql, get_attendance_sqlite, list_all_attendance_mysql,
    list_all_attendance_sqlite, list_attendance_mysql, list_attendance_sqlite,
};
pub use duplicates::{find_duplicate_mysql, find_duplicate_sqlite};
pub use employees::{
    count_employees_mysql, count_employees_sqlite, get_employee_mysql, get_employee_sqlite,
};
pub use evaluations::{
    get_evaluation_mysql, get_evaluation_sqlite, list_evaluations_mysql, list_evaluations_sqlite,
};
pub use events::{
    find_event_by_name_mysql, find_event_by_name_sqlite, get_event_mysql, get_event_sqlite,
    list_events_mysql, list_events_sqlite,
};
pub use registrations::{
    get_registration_mysql, get_registration_sqlite, list_registrations_mysql,
    list_registrations_sqlite, registration_exists_for_employee_mysql,
    registration_exists_for_employee_sqlite,
};
