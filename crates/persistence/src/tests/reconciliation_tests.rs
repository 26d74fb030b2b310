// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use wellness_domain::{EntityKind, Identity};

use crate::diesel_schema::registrations;
use crate::tests::{attendance, create_test_event, evaluation, registration};
use crate::{
    BackendConnection, ConstraintOutcome, ListQuery, Persistence, PersistenceError, plan_cleanup,
};

/// Inserts a registration with an explicit primary key, bypassing all checks.
fn insert_registration_with_id(
    persistence: &mut Persistence,
    registration_id: i64,
    employee_no: Option<&str>,
    employee_name: Option<&str>,
    event_id: i64,
) {
    let BackendConnection::Sqlite(conn) = &mut persistence.conn else {
        panic!("tests run against SQLite");
    };
    diesel::insert_into(registrations::table)
        .values((
            registrations::registration_id.eq(registration_id),
            registrations::employee_no.eq(employee_no),
            registrations::employee_name.eq(employee_name),
            registrations::event_id.eq(event_id),
        ))
        .execute(conn)
        .unwrap();
}

fn registration_ids(persistence: &mut Persistence) -> Vec<i64> {
    persistence
        .list_registrations(&ListQuery::default())
        .unwrap()
        .items
        .into_iter()
        .filter_map(|r| r.registration_id)
        .collect()
}

#[test]
fn test_keeps_lowest_id_of_each_group() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    insert_registration_with_id(&mut persistence, 12, Some("E001"), Some("Ana"), event_id);
    insert_registration_with_id(&mut persistence, 10, Some("E001"), Some("Ana"), event_id);
    insert_registration_with_id(&mut persistence, 11, Some("E001"), Some("Ana C."), event_id);

    let report = persistence.reconcile_duplicates();

    let table = report.table(EntityKind::Registration).unwrap();
    assert_eq!(table.duplicates_deleted, 2);
    assert_eq!(table.constraint, ConstraintOutcome::Installed);
    assert_eq!(registration_ids(&mut persistence), vec![10]);
}

#[test]
fn test_second_run_is_a_no_op() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    persistence
        .create_attendance(&attendance(Some("E001"), "Ana", event_id))
        .unwrap();
    persistence
        .create_attendance(&attendance(Some("E001"), "Ana", event_id))
        .unwrap();

    let first = persistence.reconcile_duplicates();
    assert_eq!(first.total_deleted(), 1);
    for table in &first.tables {
        assert_eq!(table.constraint, ConstraintOutcome::Installed);
    }

    let second = persistence.reconcile_duplicates();
    assert_eq!(second.total_deleted(), 0);
    for table in &second.tables {
        assert_eq!(table.constraint, ConstraintOutcome::AlreadyPresent);
    }
    assert_eq!(
        persistence.list_attendance(&ListQuery::default()).unwrap().total,
        1
    );
}

#[test]
fn test_unique_index_rejects_later_duplicates() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    persistence
        .create_evaluation(&evaluation(Some("E001"), "Ana", event_id))
        .unwrap();

    persistence.reconcile_duplicates();

    let result = persistence.create_evaluation(&evaluation(Some("E001"), "Ana", event_id));
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));

    // Numbers differing only in case are distinct keys.
    assert!(
        persistence
            .create_evaluation(&evaluation(Some("e001"), "Ana", event_id))
            .is_ok()
    );
}

#[test]
fn test_walk_ins_grouped_by_folded_name() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    let kept = persistence
        .create_registration(&registration(None, Some("Jane Doe"), event_id))
        .unwrap();
    persistence
        .create_registration(&registration(None, Some("  jane doe"), event_id))
        .unwrap();
    let other = persistence
        .create_registration(&registration(None, Some("John Roe"), event_id))
        .unwrap();

    let report = persistence.reconcile_duplicates();

    assert_eq!(report.table(EntityKind::Registration).unwrap().duplicates_deleted, 1);
    assert_eq!(registration_ids(&mut persistence), vec![kept, other]);
}

#[test]
fn test_blank_numbers_normalized_before_grouping() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    insert_registration_with_id(&mut persistence, 1, Some("   "), Some("Jane Doe"), event_id);
    insert_registration_with_id(&mut persistence, 2, None, Some("JANE DOE"), event_id);
    insert_registration_with_id(&mut persistence, 3, Some("NA"), Some("Someone"), event_id);

    let report = persistence.reconcile_duplicates();
    let table = report.table(EntityKind::Registration).unwrap();
    assert_eq!(table.blank_numbers_normalized, 1);
    assert_eq!(table.duplicates_deleted, 1);

    let survivor = persistence.get_registration(1).unwrap().unwrap();
    assert_eq!(survivor.employee_no, None);
    let na = persistence.get_registration(3).unwrap().unwrap();
    assert_eq!(na.employee_no.as_deref(), Some("NA"));
}

#[test]
fn test_padded_numbers_trimmed_to_match_the_guard() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    insert_registration_with_id(&mut persistence, 1, Some(" E001 "), Some("Ana"), event_id);

    let report = persistence.reconcile_duplicates();
    let table = report.table(EntityKind::Registration).unwrap();
    assert_eq!(table.padded_numbers_trimmed, 1);
    assert_eq!(table.duplicates_deleted, 0);

    let stored = persistence.get_registration(1).unwrap().unwrap();
    assert_eq!(stored.employee_no.as_deref(), Some("E001"));

    let found = persistence
        .find_duplicate(
            EntityKind::Registration,
            &Identity::ByNumber(String::from("E001")),
            event_id,
            None,
        )
        .unwrap();
    assert_eq!(found.map(|m| m.record_id), Some(1));

    let result = persistence.create_registration(&registration(Some("E001"), None, event_id));
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));

    assert_eq!(persistence.reconcile_duplicates().total_deleted(), 0);
    assert_eq!(registration_ids(&mut persistence), vec![1]);
}

#[test]
fn test_padded_duplicate_removed_before_survivor_is_trimmed() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    insert_registration_with_id(&mut persistence, 1, Some(" E001"), Some("Ana"), event_id);
    insert_registration_with_id(&mut persistence, 2, Some("E001"), Some("Ana"), event_id);

    let report = persistence.reconcile_duplicates();
    let table = report.table(EntityKind::Registration).unwrap();
    assert_eq!(table.duplicates_deleted, 1);
    assert_eq!(table.padded_numbers_trimmed, 1);
    assert_eq!(table.constraint, ConstraintOutcome::Installed);

    assert_eq!(registration_ids(&mut persistence), vec![1]);
    let survivor = persistence.get_registration(1).unwrap().unwrap();
    assert_eq!(survivor.employee_no.as_deref(), Some("E001"));
}

#[test]
fn test_rows_without_identity_are_left_alone() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    insert_registration_with_id(&mut persistence, 1, None, None, event_id);
    insert_registration_with_id(&mut persistence, 2, None, Some("  "), event_id);

    let report = persistence.reconcile_duplicates();
    assert_eq!(report.total_deleted(), 0);
    assert_eq!(registration_ids(&mut persistence), vec![1, 2]);
}

#[test]
fn test_groups_are_scoped_per_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_7 = create_test_event(&mut persistence, "Seven");
    let event_8 = create_test_event(&mut persistence, "Eight");
    persistence
        .create_registration(&registration(Some("E001"), None, event_7))
        .unwrap();
    persistence
        .create_registration(&registration(Some("E001"), None, event_8))
        .unwrap();

    assert_eq!(persistence.reconcile_duplicates().total_deleted(), 0);
}

#[test]
fn test_plan_cleanup_without_storage() {
    let rows = vec![
        (1, Some(String::from("E1")), None, 5),
        (2, Some(String::from("E1")), Some(String::from("x")), 5),
        (3, Some(String::from("e1")), None, 5),
        (4, Some(String::new()), Some(String::from("Guest")), 5),
        (5, None, Some(String::from("guest")), 5),
    ];

    let plan = plan_cleanup(&rows);
    assert_eq!(plan.blank_number_ids, vec![4]);
    assert_eq!(plan.duplicate_ids, vec![2, 5]);
    assert!(plan.padded_numbers.is_empty());
}

#[test]
fn test_plan_cleanup_trims_only_survivors() {
    let rows = vec![
        (1, Some(String::from("E1 ")), None, 5),
        (2, Some(String::from(" E1")), None, 5),
        (3, Some(String::from("\tE2")), None, 5),
    ];

    let plan = plan_cleanup(&rows);
    assert_eq!(plan.duplicate_ids, vec![2]);
    assert_eq!(
        plan.padded_numbers,
        vec![(1, String::from("E1")), (3, String::from("E2"))]
    );
    assert!(plan.blank_number_ids.is_empty());
}
