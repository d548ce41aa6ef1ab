use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use roster_core::{
    Department, DepartmentLookup, DepartmentRow, Employee, EmployeeLookup, EmployeeRow, ExError,
    ExErrorKind, Shared,
};

/// In-memory department lookup that counts how often it is consulted
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeDepartments {
    ids: RefCell<BTreeSet<i64>>,
    lookups: Cell<usize>,
}

#[allow(dead_code)]
impl FakeDepartments {
    pub fn with_ids(ids: &[i64]) -> Self {
        Self {
            ids: RefCell::new(ids.iter().copied().collect()),
            lookups: Cell::new(0),
        }
    }

    pub fn remove(&self, id: i64) {
        self.ids.borrow_mut().remove(&id);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl DepartmentLookup for FakeDepartments {
    fn department_exists(&self, id: i64) -> Result<bool, ExError> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.ids.borrow().contains(&id))
    }

    fn find_department(&self, id: i64) -> Result<Option<Shared<Department>>, ExError> {
        if !self.ids.borrow().contains(&id) {
            return Ok(None);
        }
        let department = Department::from_row(DepartmentRow {
            id,
            name: format!("Department {}", id),
            location: "HQ".to_string(),
        })?;
        Ok(Some(Rc::new(RefCell::new(department))))
    }
}

/// In-memory employee lookup
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeEmployees {
    ids: BTreeSet<i64>,
}

#[allow(dead_code)]
impl FakeEmployees {
    pub fn with_ids(ids: &[i64]) -> Self {
        Self {
            ids: ids.iter().copied().collect(),
        }
    }
}

impl EmployeeLookup for FakeEmployees {
    fn employee_exists(&self, id: i64) -> Result<bool, ExError> {
        Ok(self.ids.contains(&id))
    }

    fn find_employee(&self, id: i64) -> Result<Option<Shared<Employee>>, ExError> {
        if !self.ids.contains(&id) {
            return Ok(None);
        }
        let departments = FakeDepartments::with_ids(&[1]);
        let employee = Employee::from_row(
            EmployeeRow {
                id,
                name: format!("Employee {}", id),
                job_title: "Staff".to_string(),
                department_id: 1,
            },
            &departments,
        )?;
        Ok(Some(Rc::new(RefCell::new(employee))))
    }
}

/// Lookup whose backing store is unavailable
#[allow(dead_code)]
pub struct UnavailableStore;

fn locked() -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message("database is locked")
}

impl DepartmentLookup for UnavailableStore {
    fn department_exists(&self, _id: i64) -> Result<bool, ExError> {
        Err(locked())
    }

    fn find_department(&self, _id: i64) -> Result<Option<Shared<Department>>, ExError> {
        Err(locked())
    }
}
