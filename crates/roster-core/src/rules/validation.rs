//! Field validation rules
//!
//! Every setter on the domain models funnels through these checks, so a
//! value is validated on each assignment and not only at construction.
//! Reference checks (department, employee) go through the lookup traits in
//! [`crate::lookup`] and are performed live against the store.

use crate::errors::{ExError, RosterError, Result};
use crate::lookup::{DepartmentLookup, EmployeeLookup};

/// Earliest accepted review year
pub const MIN_REVIEW_YEAR: i64 = 2000;

fn non_empty(value: &str, err: RosterError) -> Result<()> {
    if value.is_empty() {
        return Err(err);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    non_empty(name, RosterError::InvalidName)
}

pub fn validate_job_title(job_title: &str) -> Result<()> {
    non_empty(job_title, RosterError::InvalidJobTitle)
}

pub fn validate_department_name(name: &str) -> Result<()> {
    non_empty(name, RosterError::InvalidDepartmentName)
}

pub fn validate_location(location: &str) -> Result<()> {
    non_empty(location, RosterError::InvalidLocation)
}

pub fn validate_summary(summary: &str) -> Result<()> {
    non_empty(summary, RosterError::InvalidSummary)
}

pub fn validate_year(year: i64) -> Result<()> {
    if year < MIN_REVIEW_YEAR {
        return Err(RosterError::InvalidYear { year });
    }
    Ok(())
}

/// Check that `department_id` names a department that currently exists
///
/// # Errors
///
/// `Validation` when no such department exists; store failures from the
/// lookup propagate unchanged.
pub fn validate_department_id(
    department_id: i64,
    departments: &dyn DepartmentLookup,
) -> std::result::Result<(), ExError> {
    if !departments.department_exists(department_id)? {
        return Err(RosterError::DepartmentNotFound { department_id }.into());
    }
    Ok(())
}

/// Check that `employee_id` names an employee that currently exists
///
/// # Errors
///
/// `Validation` when no such employee exists; store failures from the
/// lookup propagate unchanged.
pub fn validate_employee_id(
    employee_id: i64,
    employees: &dyn EmployeeLookup,
) -> std::result::Result<(), ExError> {
    if !employees.employee_exists(employee_id)? {
        return Err(RosterError::EmployeeNotFound { employee_id }.into());
    }
    Ok(())
}
