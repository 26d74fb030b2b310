// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Month};
use wellness_domain::Event;

use crate::tests::{create_test_date, create_test_event, registration};
use crate::{ListQuery, Persistence, PersistenceError};

#[test]
fn test_create_and_get_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Mindful Mornings");

    let event = persistence.get_event(event_id).unwrap().unwrap();
    assert_eq!(event.event_id, Some(event_id));
    assert_eq!(event.event_type, "Seminar");
    assert_eq!(event.event_name, "Mindful Mornings");
    assert_eq!(event.event_date, create_test_date());
}

#[test]
fn test_get_missing_event_returns_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(persistence.get_event(404).unwrap(), None);
}

#[test]
fn test_duplicate_type_and_name_is_unique_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_event(&mut persistence, "Fun Run");

    let again = Event::new(
        String::from("Seminar"),
        String::from("Fun Run"),
        create_test_date(),
    );
    let result = persistence.create_event(&again);
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_same_name_with_different_type_is_allowed() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_event(&mut persistence, "Fun Run");

    let other = Event::new(
        String::from("Sports Fest"),
        String::from("Fun Run"),
        create_test_date(),
    );
    assert!(persistence.create_event(&other).is_ok());
}

#[test]
fn test_find_event_by_name_prefers_exact_match() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let lower_id = create_test_event(&mut persistence, "fun run");
    let exact_id = create_test_event(&mut persistence, "Fun Run");

    let found = persistence.find_event_by_name("Fun Run").unwrap().unwrap();
    assert_eq!(found.event_id, Some(exact_id));

    let found = persistence.find_event_by_name("fun run").unwrap().unwrap();
    assert_eq!(found.event_id, Some(lower_id));
}

#[test]
fn test_find_event_by_name_falls_back_to_case_insensitive() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Wellness Week");

    let found = persistence
        .find_event_by_name("  WELLNESS week ")
        .unwrap()
        .unwrap();
    assert_eq!(found.event_id, Some(event_id));
}

#[test]
fn test_find_event_by_name_unknown_or_blank() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_event(&mut persistence, "Wellness Week");

    assert_eq!(persistence.find_event_by_name("Nope").unwrap(), None);
    assert_eq!(persistence.find_event_by_name("   ").unwrap(), None);
}

#[test]
fn test_update_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");

    let new_date = Date::from_calendar_date(2026, Month::April, 1).unwrap();
    let updated = Event::new(String::from("Sports Fest"), String::from("Fun Run 5K"), new_date);
    persistence.update_event(event_id, &updated).unwrap();

    let event = persistence.get_event(event_id).unwrap().unwrap();
    assert_eq!(event.event_type, "Sports Fest");
    assert_eq!(event.event_name, "Fun Run 5K");
    assert_eq!(event.event_date, new_date);
}

#[test]
fn test_delete_event_cascades_to_registrations() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let event_id = create_test_event(&mut persistence, "Fun Run");
    let keep_id = create_test_event(&mut persistence, "Yoga");

    persistence
        .create_registration(&registration(Some("E001"), Some("Ana"), event_id))
        .unwrap();
    persistence
        .create_registration(&registration(Some("E001"), Some("Ana"), keep_id))
        .unwrap();

    persistence.delete_event(event_id).unwrap();

    let page = persistence.list_registrations(&ListQuery::default()).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].event_id, keep_id);
}

#[test]
fn test_delete_missing_event_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let result = persistence.delete_event(99);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_registration_for_missing_event_is_foreign_key_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let result = persistence.create_registration(&registration(Some("E001"), None, 77));
    assert!(matches!(result, Err(PersistenceError::ForeignKeyViolation(_))));
}
