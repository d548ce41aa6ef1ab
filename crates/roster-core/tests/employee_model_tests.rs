#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{FakeDepartments, UnavailableStore};
use proptest::prelude::*;
use roster_core::{Employee, EmployeeRow, ExErrorKind, RosterError};

#[test]
fn test_new_employee_is_transient() {
    let departments = FakeDepartments::with_ids(&[1]);
    let employee = Employee::new("Alice", "Engineer", 1, &departments).unwrap();

    assert_eq!(employee.id(), None);
    assert!(!employee.is_persisted());
    assert_eq!(employee.name(), "Alice");
    assert_eq!(employee.job_title(), "Engineer");
    assert_eq!(employee.department_id(), 1);
}

#[test]
fn test_new_rejects_empty_name_and_title() {
    let departments = FakeDepartments::with_ids(&[1]);

    let err = Employee::new("", "Engineer", 1, &departments).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert_eq!(err.message(), "Name must be a non-empty string");

    let err = Employee::new("Alice", "", 1, &departments).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert_eq!(err.message(), "Job title must be a non-empty string");
}

#[test]
fn test_new_rejects_missing_department() {
    let departments = FakeDepartments::with_ids(&[1]);
    let err = Employee::new("Bob", "Manager", 999, &departments).unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.entity_id(), Some("999"));
}

#[test]
fn test_setters_revalidate_and_keep_old_value_on_failure() {
    let departments = FakeDepartments::with_ids(&[1, 2]);
    let mut employee = Employee::new("Alice", "Engineer", 1, &departments).unwrap();

    assert_eq!(employee.set_name(""), Err(RosterError::InvalidName));
    assert_eq!(employee.name(), "Alice");

    assert_eq!(employee.set_job_title(""), Err(RosterError::InvalidJobTitle));
    assert_eq!(employee.job_title(), "Engineer");

    let err = employee.set_department_id(999, &departments).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(employee.department_id(), 1);

    employee.set_department_id(2, &departments).unwrap();
    employee.set_name("Alice Smith").unwrap();
    assert_eq!(employee.department_id(), 2);
    assert_eq!(employee.name(), "Alice Smith");
}

#[test]
fn test_department_is_looked_up_on_every_assignment() {
    let departments = FakeDepartments::with_ids(&[1]);
    let mut employee = Employee::new("Alice", "Engineer", 1, &departments).unwrap();
    assert_eq!(departments.lookups(), 1);

    employee.set_department_id(1, &departments).unwrap();
    assert_eq!(departments.lookups(), 2);

    // The department vanished after construction: same id is now rejected
    departments.remove(1);
    assert!(employee.set_department_id(1, &departments).is_err());
    assert_eq!(departments.lookups(), 3);
}

#[test]
fn test_store_failure_during_lookup_propagates_unchanged() {
    let err = Employee::new("Alice", "Engineer", 1, &UnavailableStore).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.message(), "database is locked");
}

#[test]
fn test_refresh_is_all_or_nothing() {
    let departments = FakeDepartments::with_ids(&[1, 2]);
    let mut employee = Employee::from_row(
        EmployeeRow {
            id: 5,
            name: "Alice".to_string(),
            job_title: "Engineer".to_string(),
            department_id: 1,
        },
        &departments,
    )
    .unwrap();

    let bad = EmployeeRow {
        id: 5,
        name: "Alicia".to_string(),
        job_title: "Lead".to_string(),
        department_id: 404,
    };
    assert!(employee.refresh(bad, &departments).is_err());
    assert_eq!(employee.name(), "Alice");
    assert_eq!(employee.job_title(), "Engineer");

    let good = EmployeeRow {
        id: 5,
        name: "Alicia".to_string(),
        job_title: "Lead".to_string(),
        department_id: 2,
    };
    employee.refresh(good, &departments).unwrap();
    assert_eq!(employee.name(), "Alicia");
    assert_eq!(employee.department_id(), 2);
}

#[test]
fn test_assign_id_and_detach() {
    let departments = FakeDepartments::with_ids(&[1]);
    let mut employee = Employee::new("Alice", "Engineer", 1, &departments).unwrap();

    employee.assign_id(3);
    assert_eq!(employee.id(), Some(3));
    employee.detach();
    assert_eq!(employee.id(), None);
}

#[test]
fn test_display_format() {
    let departments = FakeDepartments::with_ids(&[1]);
    let mut employee = Employee::new("Alice", "Engineer", 1, &departments).unwrap();
    assert_eq!(employee.to_string(), "<Employee None: Alice, Engineer, Dept: 1>");

    employee.assign_id(1);
    assert_eq!(employee.to_string(), "<Employee 1: Alice, Engineer, Dept: 1>");
}

proptest! {
    #[test]
    fn prop_any_non_empty_name_is_accepted(name in ".+") {
        let departments = FakeDepartments::with_ids(&[1]);
        let mut employee = Employee::new("Alice", "Engineer", 1, &departments).unwrap();
        prop_assert!(employee.set_name(name.clone()).is_ok());
        prop_assert_eq!(employee.name(), name.as_str());
    }

    #[test]
    fn prop_unknown_department_never_changes_reference(id in 2_i64..10_000) {
        let departments = FakeDepartments::with_ids(&[1]);
        let mut employee = Employee::new("Alice", "Engineer", 1, &departments).unwrap();
        prop_assert!(employee.set_department_id(id, &departments).is_err());
        prop_assert_eq!(employee.department_id(), 1);
    }
}
