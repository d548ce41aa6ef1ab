#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::FakeEmployees;
use roster_core::{Department, ExErrorKind, Review, ReviewRow, RosterError};

#[test]
fn test_department_validation() {
    assert_eq!(
        Department::new("", "Building A"),
        Err(RosterError::InvalidDepartmentName)
    );
    assert_eq!(
        Department::new("Payroll", ""),
        Err(RosterError::InvalidLocation)
    );

    let mut department = Department::new("Payroll", "Building A").unwrap();
    assert!(department.set_location("").is_err());
    assert_eq!(department.location(), "Building A");
    assert_eq!(department.to_string(), "<Department None: Payroll, Building A>");
}

#[test]
fn test_review_requires_existing_employee() {
    let employees = FakeEmployees::with_ids(&[1]);

    let review = Review::new(2023, "Solid year", 1, &employees).unwrap();
    assert_eq!(review.employee_id(), 1);
    assert_eq!(review.to_string(), "<Review None: 2023, Solid year, Employee: 1>");

    let err = Review::new(2023, "Solid year", 42, &employees).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert_eq!(err.entity_id(), Some("42"));
}

#[test]
fn test_review_year_and_summary_rules() {
    let employees = FakeEmployees::with_ids(&[1]);

    assert!(Review::new(1999, "Old", 1, &employees).is_err());
    assert!(Review::new(2000, "", 1, &employees).is_err());

    let mut review = Review::new(2000, "Fine", 1, &employees).unwrap();
    assert_eq!(
        review.set_year(1990),
        Err(RosterError::InvalidYear { year: 1990 })
    );
    assert_eq!(review.year(), 2000);
}

#[test]
fn test_review_from_row_trusts_stored_employee_reference() {
    let review = Review::from_row(ReviewRow {
        id: 9,
        year: 2021,
        summary: "Promoted".to_string(),
        employee_id: 77,
    })
    .unwrap();
    assert_eq!(review.id(), Some(9));
    assert_eq!(review.employee_id(), 77);
}
