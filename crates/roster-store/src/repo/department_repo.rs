//! Department repository
//!
//! Maps the `departments` table to identity-mapped [`Department`] instances
//! and serves as the [`DepartmentLookup`] employees validate against.

use rusqlite::Connection;

use roster_core::errors::RosterError;
use roster_core::Persistent;
use roster_core::{
    Department, DepartmentLookup, DepartmentRow, Employee, EmployeeRow, IdentityMap, Shared,
};

use crate::errors::{from_rusqlite, Result};
use crate::repo::materialize::{fetch_one, materialize_all, row_exists, RowMaterializer};
use crate::repo::{delete_instance, logged, persisted};

const ENTITY: &str = Department::ENTITY;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY,
    name TEXT,
    location TEXT)";

const SELECT_SQL: &str = "SELECT id, name, location FROM departments";

/// SQLite repository for Departments
pub struct DepartmentRepo<'c> {
    conn: &'c Connection,
    cache: IdentityMap<Department>,
}

impl<'c> DepartmentRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            cache: IdentityMap::new(),
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<Department> {
        &self.cache
    }

    pub fn create_table(&self) -> Result<()> {
        logged("department.create_table", || {
            self.conn
                .execute(CREATE_TABLE_SQL, [])
                .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    /// Drop the table and forget every live instance
    pub fn drop_table(&self) -> Result<()> {
        logged("department.drop_table", || {
            self.conn
                .execute("DROP TABLE IF EXISTS departments", [])
                .map_err(from_rusqlite)?;
            self.cache.clear();
            Ok(())
        })
    }

    /// Insert `department` as a new row and register it
    pub fn save(&self, mut department: Department) -> Result<Shared<Department>> {
        logged("department.save", || {
            self.conn
                .execute(
                    "INSERT INTO departments (name, location) VALUES (?1, ?2)",
                    rusqlite::params![department.name(), department.location()],
                )
                .map_err(from_rusqlite)?;

            let id = self.conn.last_insert_rowid();
            department.assign_id(id);
            tracing::debug!(department_id = id, "department inserted");
            Ok(self.cache.register(id, department))
        })
    }

    pub fn create(
        &self,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Shared<Department>> {
        let department = Department::new(name, location)?;
        self.save(department)
    }

    /// Canonical instance for `row`, refreshed in place when cached
    pub fn instance_from_db(&self, row: DepartmentRow) -> Result<Shared<Department>> {
        let id = row.id;
        if let Some(existing) = self.cache.get(id) {
            existing
                .try_borrow_mut()
                .map_err(|_| RosterError::InstanceBorrowed { entity: ENTITY, id })?
                .refresh(row)?;
            return Ok(existing);
        }

        let department = Department::from_row(row)?;
        Ok(self.cache.register(id, department))
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Shared<Department>>> {
        let sql = format!("{} WHERE id = ?1", SELECT_SQL);
        fetch_one::<DepartmentRow, _>(self.conn, &sql, [id])?
            .map(|row| self.instance_from_db(row))
            .transpose()
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Shared<Department>>> {
        let sql = format!("{} WHERE name = ?1", SELECT_SQL);
        fetch_one::<DepartmentRow, _>(self.conn, &sql, [name])?
            .map(|row| self.instance_from_db(row))
            .transpose()
    }

    pub fn get_all(&self) -> Result<Vec<Shared<Department>>> {
        materialize_all(self.conn, SELECT_SQL, [], self)
    }

    /// # Errors
    /// `Detached` if the department has no id, `NotFound` if its row is gone.
    pub fn update(&self, department: &Shared<Department>) -> Result<()> {
        logged("department.update", || {
            let (department, id) = persisted(department)?;

            let changed = self
                .conn
                .execute(
                    "UPDATE departments SET name = ?1, location = ?2 WHERE id = ?3",
                    rusqlite::params![department.name(), department.location(), id],
                )
                .map_err(from_rusqlite)?;

            if changed == 0 {
                return Err(RosterError::RowNotFound { entity: ENTITY, id }.into());
            }
            Ok(())
        })
    }

    /// Delete the row, evict the instance and clear its id
    ///
    /// Employees that reference the department are left as they are.
    ///
    /// # Errors
    /// `Detached` if the department has no id, `NotFound` if its row is gone.
    pub fn delete(&self, department: &Shared<Department>) -> Result<()> {
        logged("department.delete", || {
            let id = delete_instance(
                self.conn,
                &self.cache,
                department,
                "DELETE FROM departments WHERE id = ?1",
            )?;
            tracing::debug!(department_id = id, "department deleted");
            Ok(())
        })
    }

    /// Employees assigned to `department`, materialized by the employee mapper
    pub fn employees<M>(
        &self,
        department: &Shared<Department>,
        employees: &M,
    ) -> Result<Vec<Shared<Employee>>>
    where
        M: RowMaterializer<Entity = Employee, Row = EmployeeRow>,
    {
        let id = department.borrow().id();
        let Some(id) = id else {
            return Ok(Vec::new());
        };
        materialize_all(
            self.conn,
            "SELECT id, name, job_title, department_id FROM employees WHERE department_id = ?1",
            [id],
            employees,
        )
    }
}

impl RowMaterializer for DepartmentRepo<'_> {
    type Entity = Department;
    type Row = DepartmentRow;

    fn instance_from_db(&self, row: DepartmentRow) -> Result<Shared<Department>> {
        DepartmentRepo::instance_from_db(self, row)
    }
}

impl DepartmentLookup for DepartmentRepo<'_> {
    fn department_exists(&self, id: i64) -> Result<bool> {
        row_exists(self.conn, "SELECT 1 FROM departments WHERE id = ?1", [id])
    }

    fn find_department(&self, id: i64) -> Result<Option<Shared<Department>>> {
        self.find_by_id(id)
    }
}
