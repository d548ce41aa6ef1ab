use crate::errors::{ExError, Result};
use crate::lookup::DepartmentLookup;
use crate::model::Persistent;
use crate::rules::validation;

/// Employee - a person assigned to a department
///
/// Fields are private so that every assignment goes through a validating
/// setter. An employee without an `id` is transient: it has never been saved
/// or it has been deleted.
#[derive(Debug, PartialEq, Eq)]
pub struct Employee {
    id: Option<i64>,
    name: String,
    job_title: String,
    department_id: i64,
}

/// Raw `employees` row as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub job_title: String,
    pub department_id: i64,
}

impl Employee {
    /// Create a transient employee
    ///
    /// # Errors
    /// `Validation` if name or job title is empty, or if `department_id`
    /// does not resolve through `departments`.
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
        departments: &dyn DepartmentLookup,
    ) -> std::result::Result<Self, ExError> {
        let name = name.into();
        let job_title = job_title.into();
        validation::validate_name(&name)?;
        validation::validate_job_title(&job_title)?;
        validation::validate_department_id(department_id, departments)?;

        Ok(Self {
            id: None,
            name,
            job_title,
            department_id,
        })
    }

    /// Rebuild an employee from a known row, validating every field
    ///
    /// # Errors
    /// Same as [`Employee::new`].
    pub fn from_row(
        row: EmployeeRow,
        departments: &dyn DepartmentLookup,
    ) -> std::result::Result<Self, ExError> {
        let mut employee = Self::new(row.name, row.job_title, row.department_id, departments)?;
        employee.id = Some(row.id);
        Ok(employee)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department_id(&self) -> i64 {
        self.department_id
    }

    /// True once the store has assigned an identifier
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// # Errors
    /// `InvalidName` if `name` is empty; the current name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validation::validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// # Errors
    /// `InvalidJobTitle` if `job_title` is empty; the current title is kept.
    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<()> {
        let job_title = job_title.into();
        validation::validate_job_title(&job_title)?;
        self.job_title = job_title;
        Ok(())
    }

    /// Reassign the department after a live existence check
    ///
    /// # Errors
    /// `Validation` if the department does not exist; the current reference
    /// is kept. Store failures from the lookup propagate.
    pub fn set_department_id(
        &mut self,
        department_id: i64,
        departments: &dyn DepartmentLookup,
    ) -> std::result::Result<(), ExError> {
        validation::validate_department_id(department_id, departments)?;
        self.department_id = department_id;
        Ok(())
    }

    /// Overwrite the fields with a fresher row for the same identifier
    ///
    /// All fields are validated before any is assigned, so a rejected row
    /// leaves the instance untouched.
    ///
    /// # Errors
    /// Same as [`Employee::new`].
    pub fn refresh(
        &mut self,
        row: EmployeeRow,
        departments: &dyn DepartmentLookup,
    ) -> std::result::Result<(), ExError> {
        validation::validate_name(&row.name)?;
        validation::validate_job_title(&row.job_title)?;
        validation::validate_department_id(row.department_id, departments)?;

        self.id = Some(row.id);
        self.name = row.name;
        self.job_title = row.job_title;
        self.department_id = row.department_id;
        Ok(())
    }

    /// Record the identifier the store assigned on insert
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Clear the identifier after the row has been deleted
    pub fn detach(&mut self) {
        self.id = None;
    }
}

impl Persistent for Employee {
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn detach(&mut self) {
        self.id = None;
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Employee {}: ", id)?,
            None => write!(f, "<Employee None: ")?,
        }
        write!(
            f,
            "{}, {}, Dept: {}>",
            self.name, self.job_title, self.department_id
        )
    }
}
