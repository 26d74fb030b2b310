// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wellness_domain::Employee;

use crate::tests::{
    attendance_request, create_test_admin, create_test_event, evaluation_request,
    registration_request, setup,
};
use crate::{
    ApiError, ListParams, RatingValue, create_attendance, create_evaluation, create_registration,
    delete_attendance, delete_evaluation, delete_registration, get_employee, get_evaluation,
    list_attendance, list_registrations,
};

fn directory_entry(employee_no: &str, employee_name: &str, department: &str) -> Employee {
    Employee {
        employee_no: String::from(employee_no),
        employee_name: String::from(employee_name),
        department: Some(String::from(department)),
        age: Some(34),
        gender: Some(String::from("F")),
    }
}

#[test]
fn test_unknown_event_is_rejected() {
    let mut persistence = setup();
    let result = create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Ana"), 999),
        &create_test_admin(),
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "Event 999 not found"
    );
}

#[test]
fn test_directory_fills_missing_name_and_department() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    persistence
        .upsert_employee(&directory_entry("E001", "Ana Cruz", "Finance"))
        .unwrap();

    let mut request = attendance_request(Some("E001"), None, event_id);
    request.department = None;
    let created = create_attendance(&mut persistence, &request, &admin).unwrap();

    assert_eq!(created.employee_name, "Ana Cruz");
    assert_eq!(created.department.as_deref(), Some("Finance"));
}

#[test]
fn test_directory_never_overwrites_supplied_values() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    persistence
        .upsert_employee(&directory_entry("E001", "Ana Cruz", "Finance"))
        .unwrap();

    let mut request = registration_request(Some("E001"), Some("Ana C."), event_id);
    request.department = None;
    let created = create_registration(&mut persistence, &request, &admin).unwrap();

    assert_eq!(created.employee_name.as_deref(), Some("Ana C."));
    assert_eq!(created.department.as_deref(), Some("Finance"));
}

#[test]
fn test_attendance_requires_name_when_not_in_directory() {
    let mut persistence = setup();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let result = create_attendance(
        &mut persistence,
        &attendance_request(Some("E404"), None, event_id),
        &create_test_admin(),
    );
    let Err(ApiError::InvalidInput { field, .. }) = result else {
        panic!("expected InvalidInput, got {result:?}");
    };
    assert_eq!(field, "employee_name");
}

#[test]
fn test_registration_allows_number_without_name() {
    let mut persistence = setup();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let created = create_registration(
        &mut persistence,
        &registration_request(Some("E404"), None, event_id),
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(created.employee_name, None);
}

#[test]
fn test_invalid_mode_is_rejected() {
    let mut persistence = setup();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let mut request = attendance_request(Some("E001"), Some("Ana"), event_id);
    request.mode = String::from("Hybrid");
    let result = create_attendance(&mut persistence, &request, &create_test_admin());
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "mode"));
}

#[test]
fn test_evaluation_round_trip_and_invalid_rating() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let created = create_evaluation(
        &mut persistence,
        &evaluation_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();
    let fetched = get_evaluation(&mut persistence, created.evaluation_id).unwrap();
    assert_eq!(fetched.speaker_delivery, "3");
    assert_eq!(fetched.materials, "NA");
    assert_eq!(fetched.session_helpful, "Yes");

    let mut bad = evaluation_request(Some("E002"), Some("Ben"), event_id);
    bad.venue = RatingValue::Number(6);
    assert!(matches!(
        create_evaluation(&mut persistence, &bad, &admin),
        Err(ApiError::InvalidInput { .. })
    ));

    let mut bad_flag = evaluation_request(Some("E003"), Some("Cy"), event_id);
    bad_flag.session_helpful = String::from("Maybe");
    assert!(matches!(
        create_evaluation(&mut persistence, &bad_flag, &admin),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_list_pagination_reports_total() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let fun_run = create_test_event(&mut persistence, "Fun Run");
    let yoga = create_test_event(&mut persistence, "Yoga");

    for n in 1..=5 {
        let number = format!("E00{n}");
        create_registration(
            &mut persistence,
            &registration_request(Some(&number), Some("Someone"), fun_run),
            &admin,
        )
        .unwrap();
    }
    create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Someone"), yoga),
        &admin,
    )
    .unwrap();

    let page = list_registrations(
        &mut persistence,
        &ListParams {
            event_id: Some(fun_run),
            limit: Some(2),
            offset: Some(2),
        },
    )
    .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].employee_no.as_deref(), Some("E003"));

    let all = list_registrations(&mut persistence, &ListParams::default()).unwrap();
    assert_eq!(all.total, 6);
}

#[test]
fn test_delete_records() {
    let mut persistence = setup();
    let admin = create_test_admin();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let registration = create_registration(
        &mut persistence,
        &registration_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();
    let attendance = create_attendance(
        &mut persistence,
        &attendance_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();
    let evaluation = create_evaluation(
        &mut persistence,
        &evaluation_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();

    delete_registration(&mut persistence, registration.registration_id, &admin).unwrap();
    delete_attendance(&mut persistence, attendance.attendance_id, &admin).unwrap();
    delete_evaluation(&mut persistence, evaluation.evaluation_id, &admin).unwrap();

    assert!(matches!(
        delete_attendance(&mut persistence, attendance.attendance_id, &admin),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert_eq!(
        list_attendance(&mut persistence, &ListParams::default())
            .unwrap()
            .total,
        0
    );

    // The identity is free again once the record is gone.
    create_attendance(
        &mut persistence,
        &attendance_request(Some("E001"), Some("Ana"), event_id),
        &admin,
    )
    .unwrap();
}

#[test]
fn test_employee_lookup() {
    let mut persistence = setup();
    persistence
        .upsert_employee(&directory_entry("E001", "Ana Cruz", "Finance"))
        .unwrap();

    let found = get_employee(&mut persistence, " E001 ").unwrap();
    assert_eq!(found.employee_name, "Ana Cruz");
    assert_eq!(found.age, Some(34));

    assert!(matches!(
        get_employee(&mut persistence, "E404"),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
