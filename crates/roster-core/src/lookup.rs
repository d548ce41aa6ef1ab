//! Narrow lookup capabilities used for foreign-key validation
//!
//! The models never talk to the store directly. A setter that needs to know
//! whether a referenced row exists receives one of these traits, which the
//! store's repositories implement. This also keeps the Employee and Review
//! mappers from depending on each other concretely.

use crate::errors::ExError;
use crate::model::{Department, Employee, Shared};

/// Resolves department identifiers
pub trait DepartmentLookup {
    /// Whether a department row with this identifier exists
    ///
    /// Must not materialize or refresh any instance, so that validation
    /// never contends with handles the caller is holding.
    fn department_exists(&self, id: i64) -> Result<bool, ExError>;

    /// Returns `Ok(None)` when no department has this identifier.
    fn find_department(&self, id: i64) -> Result<Option<Shared<Department>>, ExError>;
}

/// Resolves employee identifiers
pub trait EmployeeLookup {
    /// Whether an employee row with this identifier exists, without
    /// materializing it
    fn employee_exists(&self, id: i64) -> Result<bool, ExError>;

    /// Returns `Ok(None)` when no employee has this identifier.
    fn find_employee(&self, id: i64) -> Result<Option<Shared<Employee>>, ExError>;
}
