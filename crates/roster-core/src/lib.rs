//! Roster Core - domain models and the facilities shared by every crate
//!
//! - Employee, Department and Review models with validating setters
//! - Field validation rules, including live foreign-key checks
//! - The identity map used by the repositories
//! - Error facility (`RosterError`, `ExError`) and logging facility

pub mod errors;
pub mod logging_facility;
pub mod lookup;
pub mod model;
pub mod ops;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, RosterError};
pub use lookup::{DepartmentLookup, EmployeeLookup};
pub use model::{
    Department, DepartmentRow, Employee, EmployeeRow, Persistent, Review, ReviewRow, Shared,
};
pub use ops::IdentityMap;
