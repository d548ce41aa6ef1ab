use thiserror::Error;

/// Result type alias using RosterError
pub type Result<T> = std::result::Result<T, RosterError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A field assignment was rejected (empty text, dangling reference, out of range)
    Validation,
    /// A row expected to exist is gone
    NotFound,
    /// The object has no identifier (never saved, or already deleted)
    Detached,
    /// The canonical instance is currently borrowed elsewhere
    Concurrency,

    // Integration/IO
    Io,
    Config,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Detached => "ERR_DETACHED",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for rejected field assignments
    pub fn is_validation(&self) -> bool {
        self.kind == ExErrorKind::Validation
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for Roster entities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    // ===== Validation Errors =====
    /// Employee name was empty
    #[error("Name must be a non-empty string")]
    InvalidName,

    /// Employee job title was empty
    #[error("Job title must be a non-empty string")]
    InvalidJobTitle,

    /// Department reference does not resolve to a stored department
    #[error("Department must exist in the departments table (department_id: {department_id})")]
    DepartmentNotFound { department_id: i64 },

    /// Department name was empty
    #[error("Department name must be a non-empty string")]
    InvalidDepartmentName,

    /// Department location was empty
    #[error("Location must be a non-empty string")]
    InvalidLocation,

    /// Review year before the earliest accepted year
    #[error("Year must be an integer >= 2000 (got {year})")]
    InvalidYear { year: i64 },

    /// Review summary was empty
    #[error("Summary must be a non-empty string")]
    InvalidSummary,

    /// Employee reference does not resolve to a stored employee
    #[error("Employee must exist in the employees table (employee_id: {employee_id})")]
    EmployeeNotFound { employee_id: i64 },

    // ===== Lifecycle Errors =====
    /// Object has no identifier: never saved, or already deleted
    #[error("{entity} is detached (no identifier)")]
    Detached { entity: &'static str },

    /// Identifier is set but the row no longer exists
    #[error("{entity} row not found: {id}")]
    RowNotFound { entity: &'static str, id: i64 },

    /// The canonical instance is borrowed and cannot be refreshed
    #[error("{entity} {id} is borrowed and cannot be refreshed")]
    InstanceBorrowed { entity: &'static str, id: i64 },

    /// The handle passed to update/delete is already borrowed by the caller
    #[error("{entity} handle is already borrowed")]
    HandleBorrowed { entity: &'static str },
}

impl RosterError {
    /// True for the ValidationError family (rejected field assignments)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RosterError::InvalidName
                | RosterError::InvalidJobTitle
                | RosterError::DepartmentNotFound { .. }
                | RosterError::InvalidDepartmentName
                | RosterError::InvalidLocation
                | RosterError::InvalidYear { .. }
                | RosterError::InvalidSummary
                | RosterError::EmployeeNotFound { .. }
        )
    }
}

impl From<RosterError> for ExError {
    fn from(err: RosterError) -> Self {
        let message = err.to_string();
        match err {
            RosterError::InvalidName
            | RosterError::InvalidJobTitle
            | RosterError::InvalidDepartmentName
            | RosterError::InvalidLocation
            | RosterError::InvalidSummary
            | RosterError::InvalidYear { .. } => ExError::new(ExErrorKind::Validation)
                .with_op("validate")
                .with_message(message),
            RosterError::DepartmentNotFound { department_id } => {
                ExError::new(ExErrorKind::Validation)
                    .with_op("validate_department_id")
                    .with_entity_id(department_id)
                    .with_message(message)
            }
            RosterError::EmployeeNotFound { employee_id } => ExError::new(ExErrorKind::Validation)
                .with_op("validate_employee_id")
                .with_entity_id(employee_id)
                .with_message(message),
            RosterError::Detached { .. } => {
                ExError::new(ExErrorKind::Detached).with_message(message)
            }
            RosterError::RowNotFound { id, .. } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id)
                .with_message(message),
            RosterError::InstanceBorrowed { id, .. } => ExError::new(ExErrorKind::Concurrency)
                .with_entity_id(id)
                .with_message(message),
            RosterError::HandleBorrowed { .. } => {
                ExError::new(ExErrorKind::Concurrency).with_message(message)
            }
        }
    }
}
