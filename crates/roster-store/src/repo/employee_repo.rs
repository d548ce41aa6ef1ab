//! Employee repository
//!
//! Maps the `employees` table to identity-mapped [`Employee`] instances.
//! Foreign-key validation of `department_id` is delegated to a
//! [`DepartmentLookup`] and performed on every assignment, including when a
//! cached instance is refreshed from a row.

use rusqlite::Connection;

use roster_core::errors::RosterError;
use roster_core::Persistent;
use roster_core::{
    Department, DepartmentLookup, Employee, EmployeeLookup, EmployeeRow, IdentityMap, Review,
    ReviewRow, Shared,
};

use crate::errors::{from_rusqlite, Result};
use crate::repo::materialize::{fetch_one, materialize_all, row_exists, RowMaterializer};
use crate::repo::{delete_instance, logged, persisted};

const ENTITY: &str = Employee::ENTITY;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT,
    job_title TEXT,
    department_id INTEGER,
    FOREIGN KEY (department_id) REFERENCES departments(id))";

const SELECT_SQL: &str = "SELECT id, name, job_title, department_id FROM employees";

/// SQLite repository for Employees
pub struct EmployeeRepo<'c> {
    conn: &'c Connection,
    departments: &'c dyn DepartmentLookup,
    cache: IdentityMap<Employee>,
}

impl<'c> EmployeeRepo<'c> {
    /// Create a repository with an empty identity map
    pub fn new(conn: &'c Connection, departments: &'c dyn DepartmentLookup) -> Self {
        Self {
            conn,
            departments,
            cache: IdentityMap::new(),
        }
    }

    /// Live instances, keyed by id
    pub fn identity_map(&self) -> &IdentityMap<Employee> {
        &self.cache
    }

    /// Create the `employees` table if it does not exist
    pub fn create_table(&self) -> Result<()> {
        logged("employee.create_table", || {
            self.conn
                .execute(CREATE_TABLE_SQL, [])
                .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    /// Drop the `employees` table if it exists and forget every live instance
    pub fn drop_table(&self) -> Result<()> {
        logged("employee.drop_table", || {
            self.conn
                .execute("DROP TABLE IF EXISTS employees", [])
                .map_err(from_rusqlite)?;
            self.cache.clear();
            Ok(())
        })
    }

    /// Build a transient employee, validating against this repository's
    /// department lookup
    ///
    /// # Errors
    /// `Validation` for empty text fields or an unknown department.
    pub fn build(
        &self,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Employee> {
        Employee::new(name, job_title, department_id, self.departments)
    }

    /// Insert `employee` as a new row and register it
    ///
    /// Consumes the value and returns the canonical handle. An employee that
    /// already carries an id (rebuilt with [`Employee::from_row`]) is still
    /// inserted as a new row and takes the new id.
    ///
    /// # Errors
    /// `Persistence` if the insert fails.
    pub fn save(&self, mut employee: Employee) -> Result<Shared<Employee>> {
        logged("employee.save", || {
            self.conn
                .execute(
                    "INSERT INTO employees (name, job_title, department_id) VALUES (?1, ?2, ?3)",
                    rusqlite::params![
                        employee.name(),
                        employee.job_title(),
                        employee.department_id()
                    ],
                )
                .map_err(from_rusqlite)?;

            let id = self.conn.last_insert_rowid();
            employee.assign_id(id);
            tracing::debug!(employee_id = id, "employee inserted");
            Ok(self.cache.register(id, employee))
        })
    }

    /// Build and save in one step
    ///
    /// # Errors
    /// `Validation` before anything is written; `Persistence` on insert.
    pub fn create(
        &self,
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Shared<Employee>> {
        let employee = self.build(name, job_title, department_id)?;
        self.save(employee)
    }

    /// Canonical instance for `row`
    ///
    /// A cached instance is refreshed in place (all-or-nothing validation)
    /// and returned; otherwise a new instance is registered.
    ///
    /// # Errors
    /// `Validation` if the row holds invalid values, `Concurrency` if the
    /// cached instance is currently borrowed.
    pub fn instance_from_db(&self, row: EmployeeRow) -> Result<Shared<Employee>> {
        let id = row.id;
        if let Some(existing) = self.cache.get(id) {
            existing
                .try_borrow_mut()
                .map_err(|_| RosterError::InstanceBorrowed { entity: ENTITY, id })?
                .refresh(row, self.departments)?;
            return Ok(existing);
        }

        let employee = Employee::from_row(row, self.departments)?;
        Ok(self.cache.register(id, employee))
    }

    /// Look up an employee by primary key
    pub fn find_by_id(&self, id: i64) -> Result<Option<Shared<Employee>>> {
        let sql = format!("{} WHERE id = ?1", SELECT_SQL);
        fetch_one::<EmployeeRow, _>(self.conn, &sql, [id])?
            .map(|row| self.instance_from_db(row))
            .transpose()
    }

    /// Look up the first employee with exactly this name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Shared<Employee>>> {
        let sql = format!("{} WHERE name = ?1", SELECT_SQL);
        fetch_one::<EmployeeRow, _>(self.conn, &sql, [name])?
            .map(|row| self.instance_from_db(row))
            .transpose()
    }

    /// Every employee, in store iteration order
    pub fn get_all(&self) -> Result<Vec<Shared<Employee>>> {
        materialize_all(self.conn, SELECT_SQL, [], self)
    }

    /// Write the current field values to the employee's row
    ///
    /// # Errors
    /// `Detached` if the employee has no id, `NotFound` if its row is gone,
    /// `Concurrency` if the handle is mutably borrowed.
    pub fn update(&self, employee: &Shared<Employee>) -> Result<()> {
        logged("employee.update", || {
            let (employee, id) = persisted(employee)?;

            let changed = self
                .conn
                .execute(
                    "UPDATE employees SET name = ?1, job_title = ?2, department_id = ?3
                     WHERE id = ?4",
                    rusqlite::params![
                        employee.name(),
                        employee.job_title(),
                        employee.department_id(),
                        id
                    ],
                )
                .map_err(from_rusqlite)?;

            if changed == 0 {
                return Err(RosterError::RowNotFound { entity: ENTITY, id }.into());
            }
            Ok(())
        })
    }

    /// Delete the employee's row, evict it and clear its id
    ///
    /// # Errors
    /// `Detached` if the employee has no id (never saved, or deleted
    /// already), `NotFound` if its row is gone, `Concurrency` if the handle
    /// is borrowed. Nothing changes on error.
    pub fn delete(&self, employee: &Shared<Employee>) -> Result<()> {
        logged("employee.delete", || {
            let id = delete_instance(
                self.conn,
                &self.cache,
                employee,
                "DELETE FROM employees WHERE id = ?1",
            )?;
            tracing::debug!(employee_id = id, "employee deleted");
            Ok(())
        })
    }

    /// Reviews written for `employee`, materialized by the review mapper
    ///
    /// A detached employee has no reviews.
    pub fn reviews<M>(
        &self,
        employee: &Shared<Employee>,
        reviews: &M,
    ) -> Result<Vec<Shared<Review>>>
    where
        M: RowMaterializer<Entity = Review, Row = ReviewRow>,
    {
        let id = employee.borrow().id();
        let Some(id) = id else {
            return Ok(Vec::new());
        };
        materialize_all(
            self.conn,
            "SELECT id, year, summary, employee_id FROM reviews WHERE employee_id = ?1",
            [id],
            reviews,
        )
    }

    /// The department `employee` belongs to, if it still exists
    pub fn department(&self, employee: &Shared<Employee>) -> Result<Option<Shared<Department>>> {
        let department_id = employee.borrow().department_id();
        self.departments.find_department(department_id)
    }
}

impl RowMaterializer for EmployeeRepo<'_> {
    type Entity = Employee;
    type Row = EmployeeRow;

    fn instance_from_db(&self, row: EmployeeRow) -> Result<Shared<Employee>> {
        EmployeeRepo::instance_from_db(self, row)
    }
}

impl EmployeeLookup for EmployeeRepo<'_> {
    fn employee_exists(&self, id: i64) -> Result<bool> {
        row_exists(self.conn, "SELECT 1 FROM employees WHERE id = ?1", [id])
    }

    fn find_employee(&self, id: i64) -> Result<Option<Shared<Employee>>> {
        self.find_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::DepartmentRepo;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        DepartmentRepo::new(&conn).create_table().unwrap();
        conn
    }

    #[test]
    fn test_create_table_is_idempotent() {
        let conn = setup();
        let departments = DepartmentRepo::new(&conn);
        let employees = EmployeeRepo::new(&conn, &departments);
        employees.create_table().unwrap();
        employees.create_table().unwrap();
    }

    #[test]
    fn test_drop_table_clears_identity_map() {
        let conn = setup();
        let departments = DepartmentRepo::new(&conn);
        let employees = EmployeeRepo::new(&conn, &departments);
        employees.create_table().unwrap();

        let dept_id = departments
            .create("Engineering", "Building A")
            .unwrap()
            .borrow()
            .id()
            .unwrap();
        employees.create("Alice", "Engineer", dept_id).unwrap();
        assert_eq!(employees.identity_map().len(), 1);

        employees.drop_table().unwrap();
        assert!(employees.identity_map().is_empty());
        employees.drop_table().unwrap();
    }
}
