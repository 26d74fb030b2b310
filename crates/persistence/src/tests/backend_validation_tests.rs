// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the `MySQL`/`MariaDB` migrations and the
//! backend-specific helpers behave like their `SQLite` counterparts.
//!
//! ## Test Execution
//!
//! - `SQLite` behaviour is covered by the rest of the test suite
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only with `--ignored`
//!
//! ## Infrastructure Requirements
//!
//! - `DATABASE_URL` pointing at a disposable `MariaDB` database
//! - `WELLNESS_TEST_BACKEND=mariadb`
//!
//! Tests fail fast if required infrastructure is missing.

use diesel::MysqlConnection;
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use std::env;
use wellness_domain::EntityKind;

use crate::backend::mysql;
use crate::{ConstraintOutcome, Persistence};

/// Result type for COUNT queries.
#[derive(QueryableByName)]
struct CountResult {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL").expect("DATABASE_URL not set - MariaDB tests need a test database")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if `WELLNESS_TEST_BACKEND` is not set to `mariadb`.
fn verify_mariadb_test_environment() {
    let backend = env::var("WELLNESS_TEST_BACKEND")
        .expect("WELLNESS_TEST_BACKEND not set - MariaDB tests need WELLNESS_TEST_BACKEND=mariadb");
    assert_eq!(backend, "mariadb", "WELLNESS_TEST_BACKEND must be 'mariadb'");
}

#[test]
#[ignore = "requires MariaDB via DATABASE_URL"]
fn test_mariadb_connection() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = MysqlConnection::establish(&url);
    assert!(
        result.is_ok(),
        "Failed to connect to MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via DATABASE_URL"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = mysql::initialize_database(&url);
    assert!(
        result.is_ok(),
        "Failed to initialize MariaDB and run migrations: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via DATABASE_URL"]
fn test_mariadb_foreign_key_enforcement() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut conn = mysql::initialize_database(&url).expect("Failed to initialize MariaDB database");

    assert!(mysql::verify_foreign_key_enforcement(&mut conn).is_ok());

    let result = diesel::sql_query(
        "INSERT INTO registrations (employee_no, employee_name, event_id)
         VALUES ('E001', 'Orphan', 999999)",
    )
    .execute(&mut conn);
    assert!(
        result.is_err(),
        "Registration for a missing event should fail due to foreign key constraint"
    );
}

#[test]
#[ignore = "requires MariaDB via DATABASE_URL"]
fn test_mariadb_employee_numbers_are_case_sensitive() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut conn = mysql::initialize_database(&url).expect("Failed to initialize MariaDB database");
    conn.begin_test_transaction()
        .expect("Failed to begin transaction");

    diesel::sql_query(
        "INSERT INTO employees (employee_no, employee_name) VALUES ('CASE01', 'Upper')",
    )
    .execute(&mut conn)
    .expect("Failed to insert employee");

    let count: i64 =
        diesel::sql_query("SELECT COUNT(*) AS count FROM employees WHERE employee_no = 'case01'")
            .get_result::<CountResult>(&mut conn)
            .map(|r| r.count)
            .expect("Failed to count employees");

    assert_eq!(count, 0, "utf8mb4_bin must keep employee numbers distinct");
}

#[test]
#[ignore = "requires MariaDB via DATABASE_URL"]
fn test_mariadb_reconciliation_is_idempotent() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut persistence = Persistence::new_with_mysql(&url).expect("Failed to open MariaDB");

    // The first run may find the indexes from a previous test run.
    let first = persistence.reconcile_duplicates();
    for table in &first.tables {
        assert!(
            matches!(
                table.constraint,
                ConstraintOutcome::Installed | ConstraintOutcome::AlreadyPresent
            ),
            "{:?} failed: {:?}",
            table.kind,
            table.constraint
        );
    }

    let second = persistence.reconcile_duplicates();
    assert_eq!(second.total_deleted(), 0);
    assert_eq!(
        second.table(EntityKind::Attendance).map(|t| &t.constraint),
        Some(&ConstraintOutcome::AlreadyPresent)
    );
}
