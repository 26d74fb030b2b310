// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wellness_domain::{EntityKind, Identity, Registration, resolve_identity};

use crate::tests::{
    attendance_request, create_test_admin, create_test_event, evaluation_request,
    registration_request, setup,
};
use crate::{
    ApiError, SeenIdentities, create_attendance, create_evaluation, create_registration,
    map_write_error, update_attendance, update_registration,
};

#[test]
fn test_registration_duplicate_is_rejected() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    let request = registration_request(Some("E001"), Some("Ana"), event_id);

    create_registration(&mut persistence, &request, &admin).unwrap();
    let second = create_registration(&mut persistence, &request, &admin);

    let Err(ApiError::DuplicateFound { description }) = second else {
        panic!("expected DuplicateFound, got {second:?}");
    };
    assert!(description.contains("E001"));
    assert!(description.contains("Fun Run"));
}

#[test]
fn test_attendance_duplicate_is_rejected() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    let request = attendance_request(Some("E001"), Some("Ana"), event_id);

    create_attendance(&mut persistence, &request, &admin).unwrap();
    assert!(matches!(
        create_attendance(&mut persistence, &request, &admin),
        Err(ApiError::DuplicateFound { .. })
    ));
}

#[test]
fn test_evaluation_duplicate_is_rejected() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    let request = evaluation_request(Some("E001"), Some("Ana"), event_id);

    create_evaluation(&mut persistence, &request, &admin).unwrap();
    assert!(matches!(
        create_evaluation(&mut persistence, &request, &admin),
        Err(ApiError::DuplicateFound { .. })
    ));
}

#[test]
fn test_walk_in_names_collide_case_insensitively() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    create_attendance(
        &mut persistence,
        &attendance_request(None, Some("Jane Doe"), event_id),
        &admin,
    )
    .unwrap();

    let second = create_attendance(
        &mut persistence,
        &attendance_request(Some("  "), Some("jane doe"), event_id),
        &admin,
    );
    assert!(matches!(second, Err(ApiError::DuplicateFound { .. })));
}

#[test]
fn test_employee_numbers_are_case_sensitive() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();
    create_registration(
        &mut persistence,
        &registration_request(Some("e001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();
}

#[test]
fn test_same_identity_allowed_across_events_and_kinds() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let fun_run = create_test_event(&mut persistence, "Fun Run");
    let yoga = create_test_event(&mut persistence, "Yoga");

    create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Ana"), fun_run),
        &admin,
    )
    .unwrap();
    create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Ana"), yoga),
        &admin,
    )
    .unwrap();
    create_attendance(
        &mut persistence,
        &attendance_request(Some("E001"), Some("Ana"), fun_run),
        &admin,
    )
    .unwrap();
    create_evaluation(
        &mut persistence,
        &evaluation_request(Some("E001"), Some("Ana"), fun_run),
        &admin,
    )
    .unwrap();
}

#[test]
fn test_missing_identity_is_rejected() {
    let mut persistence = setup();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let result = create_registration(
        &mut persistence,
        &registration_request(Some(" "), None, event_id),
        &create_test_admin(),
    );
    assert_eq!(result, Err(ApiError::MissingIdentity));
}

#[test]
fn test_update_does_not_collide_with_itself() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let created = create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();

    let mut request = registration_request(Some("E001"), Some("Ana"), event_id);
    request.department = Some(String::from("Legal"));
    let updated = update_registration(
        &mut persistence,
        created.registration_id,
        &request,
        &admin,
    )
    .unwrap();
    assert_eq!(updated.department.as_deref(), Some("Legal"));
}

#[test]
fn test_update_into_another_identity_is_rejected() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    create_attendance(
        &mut persistence,
        &attendance_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();
    let other = create_attendance(
        &mut persistence,
        &attendance_request(Some("E002"), Some("Ben"), event_id),
        &admin,
    )
    .unwrap();

    let result = update_attendance(
        &mut persistence,
        other.attendance_id,
        &attendance_request(Some("E001"), Some("Ben"), event_id),
        &admin,
    );
    assert!(matches!(result, Err(ApiError::DuplicateFound { .. })));
}

#[test]
fn test_unique_index_violation_maps_to_duplicate() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    persistence.reconcile_duplicates();

    create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();

    // Bypass the pre-check to reach the index directly.
    let raw = Registration {
        registration_id: None,
        employee_no: Some(String::from("E001")),
        employee_name: Some(String::from("Ana")),
        department: None,
        event_id,
    };
    let err = persistence.create_registration(&raw).unwrap_err();

    let identity: Identity = raw.identity().unwrap();
    let event = persistence.get_event(event_id).unwrap().unwrap();
    let mapped = map_write_error(err, EntityKind::Registration, &identity, &event);
    assert!(matches!(mapped, ApiError::DuplicateFound { .. }));
}

#[test]
fn test_seen_identities_keep_first_row() {
    let mut seen = SeenIdentities::new();
    let ana: Identity = resolve_identity(Some("E001"), None).unwrap();
    let walk_in: Identity = resolve_identity(None, Some("Guest")).unwrap();

    assert_eq!(seen.first_row(&ana, 1), None);
    seen.record(ana.clone(), 1, 2);
    seen.record(ana.clone(), 1, 4);
    seen.record(walk_in.clone(), 1, 5);

    assert_eq!(seen.first_row(&ana, 1), Some(2));
    assert_eq!(seen.first_row(&ana, 2), None);
    assert_eq!(
        seen.first_row(&resolve_identity(None, Some(" GUEST ")).unwrap(), 1),
        Some(5)
    );
}
