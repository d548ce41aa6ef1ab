//! Roster Store - SQLite persistence for the Roster entities
//!
//! Provides:
//! - Connection bootstrap and store configuration
//! - Identity-mapped repositories for employees, departments and reviews
//! - Relationship traversal (employee → department, employee → reviews)

pub mod config;
pub mod db;
pub mod errors;
pub mod repo;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use repo::{DepartmentRepo, EmployeeRepo, ReviewRepo};
