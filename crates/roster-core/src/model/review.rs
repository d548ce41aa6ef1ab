use crate::errors::{ExError, Result};
use crate::lookup::EmployeeLookup;
use crate::model::Persistent;
use crate::rules::validation;

/// Review - a yearly performance review of one employee
#[derive(Debug, PartialEq, Eq)]
pub struct Review {
    id: Option<i64>,
    year: i64,
    summary: String,
    employee_id: i64,
}

/// Raw `reviews` row as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: i64,
    pub year: i64,
    pub summary: String,
    pub employee_id: i64,
}

impl Review {
    /// Create a transient review for an existing employee
    ///
    /// # Errors
    /// `Validation` for a year before 2000, an empty summary, or an
    /// `employee_id` that does not resolve through `employees`.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
        employees: &dyn EmployeeLookup,
    ) -> std::result::Result<Self, ExError> {
        let summary = summary.into();
        validation::validate_year(year)?;
        validation::validate_summary(&summary)?;
        validation::validate_employee_id(employee_id, employees)?;

        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    /// Rebuild a review from a stored row
    ///
    /// The employee reference is taken as stored: materializing a review
    /// must not call back into the employee mapper.
    ///
    /// # Errors
    /// `InvalidYear` or `InvalidSummary`.
    pub fn from_row(row: ReviewRow) -> Result<Self> {
        validation::validate_year(row.year)?;
        validation::validate_summary(&row.summary)?;

        Ok(Self {
            id: Some(row.id),
            year: row.year,
            summary: row.summary,
            employee_id: row.employee_id,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// # Errors
    /// `InvalidYear` if before 2000; the current year is kept.
    pub fn set_year(&mut self, year: i64) -> Result<()> {
        validation::validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// # Errors
    /// `InvalidSummary` if empty; the current summary is kept.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<()> {
        let summary = summary.into();
        validation::validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    /// # Errors
    /// `Validation` if the employee does not exist; the current reference
    /// is kept.
    pub fn set_employee_id(
        &mut self,
        employee_id: i64,
        employees: &dyn EmployeeLookup,
    ) -> std::result::Result<(), ExError> {
        validation::validate_employee_id(employee_id, employees)?;
        self.employee_id = employee_id;
        Ok(())
    }

    /// # Errors
    /// Same as [`Review::from_row`]; nothing is assigned on failure.
    pub fn refresh(&mut self, row: ReviewRow) -> Result<()> {
        validation::validate_year(row.year)?;
        validation::validate_summary(&row.summary)?;

        self.id = Some(row.id);
        self.year = row.year;
        self.summary = row.summary;
        self.employee_id = row.employee_id;
        Ok(())
    }

    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn detach(&mut self) {
        self.id = None;
    }
}

impl Persistent for Review {
    const ENTITY: &'static str = "Review";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn detach(&mut self) {
        self.id = None;
    }
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {}: ", id)?,
            None => write!(f, "<Review None: ")?,
        }
        write!(
            f,
            "{}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}
