// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Connection setup, migrations and foreign key enforcement are also
//! exercised implicitly by every other test that calls
//! `Persistence::new_in_memory()`.

use crate::Persistence;
use crate::tests::create_test_event;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, crate::error::PersistenceError> =
        Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    create_test_event(&mut db1, "Yoga Basics");

    assert_eq!(db1.list_events().unwrap().len(), 1, "db1 should have 1 event");
    assert!(db2.list_events().unwrap().is_empty(), "db2 should be isolated");
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.list_events().is_ok());
    assert_eq!(persistence.count_employees().unwrap(), 0);
}

#[test]
fn test_foreign_key_enforcement_enabled() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_persists_between_connections() {
    let path = std::env::temp_dir().join(format!(
        "wellness_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        create_test_event(&mut persistence, "Fun Run");
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let events = reopened.list_events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_name, "Fun Run");

    drop(reopened);
    let _ = std::fs::remove_file(&path);
}
