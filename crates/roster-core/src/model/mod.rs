pub mod department;
pub mod employee;
pub mod review;

use std::cell::RefCell;
use std::rc::Rc;

pub use department::{Department, DepartmentRow};
pub use employee::{Employee, EmployeeRow};
pub use review::{Review, ReviewRow};

/// Canonical handle to a live, identity-mapped instance
///
/// Two handles for the same identifier are always `Rc::ptr_eq`.
pub type Shared<T> = Rc<RefCell<T>>;

/// Identifier lifecycle shared by every mapped entity
pub trait Persistent {
    /// Name used in lifecycle errors
    const ENTITY: &'static str;

    fn id(&self) -> Option<i64>;

    /// Clear the identifier once the row is gone
    fn detach(&mut self);
}
