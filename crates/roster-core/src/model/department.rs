use crate::errors::Result;
use crate::model::Persistent;
use crate::rules::validation;

/// Department - an organizational unit employees belong to
#[derive(Debug, PartialEq, Eq)]
pub struct Department {
    id: Option<i64>,
    name: String,
    location: String,
}

/// Raw `departments` row as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl Department {
    /// Create a transient department
    ///
    /// # Errors
    /// `InvalidDepartmentName` or `InvalidLocation` for empty values.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let location = location.into();
        validation::validate_department_name(&name)?;
        validation::validate_location(&location)?;

        Ok(Self {
            id: None,
            name,
            location,
        })
    }

    /// # Errors
    /// Same as [`Department::new`].
    pub fn from_row(row: DepartmentRow) -> Result<Self> {
        let mut department = Self::new(row.name, row.location)?;
        department.id = Some(row.id);
        Ok(department)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// # Errors
    /// `InvalidDepartmentName` if empty; the current name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validation::validate_department_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// # Errors
    /// `InvalidLocation` if empty; the current location is kept.
    pub fn set_location(&mut self, location: impl Into<String>) -> Result<()> {
        let location = location.into();
        validation::validate_location(&location)?;
        self.location = location;
        Ok(())
    }

    /// Validate-then-assign refresh from a fresher row
    ///
    /// # Errors
    /// Same as [`Department::new`]; nothing is assigned on failure.
    pub fn refresh(&mut self, row: DepartmentRow) -> Result<()> {
        validation::validate_department_name(&row.name)?;
        validation::validate_location(&row.location)?;

        self.id = Some(row.id);
        self.name = row.name;
        self.location = row.location;
        Ok(())
    }

    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn detach(&mut self) {
        self.id = None;
    }
}

impl Persistent for Department {
    const ENTITY: &'static str = "Department";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn detach(&mut self) {
        self.id = None;
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Department {}: {}, {}>", id, self.name, self.location),
            None => write!(f, "<Department None: {}, {}>", self.name, self.location),
        }
    }
}
