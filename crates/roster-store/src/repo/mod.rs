//! Repository layer: identity-mapped mappers between rows and models
//!
//! Every statement auto-commits. Repositories borrow the connection and
//! own their identity map, so two repositories over the same connection
//! have independent caches.

pub mod department_repo;
pub mod employee_repo;
pub mod materialize;
pub mod review_repo;

pub use department_repo::DepartmentRepo;
pub use employee_repo::EmployeeRepo;
pub use materialize::{FromSqlRow, RowMaterializer};
pub use review_repo::ReviewRepo;

use roster_core::{log_op_end, log_op_error, log_op_start};
use roster_core::{IdentityMap, Persistent, RosterError, Shared};
use rusqlite::Connection;
use std::cell::Ref;
use std::rc::Rc;
use std::time::Instant;

use crate::errors::{from_rusqlite, Result};

/// Run `f` between start/end (or end_error) log events for `op`
pub(crate) fn logged<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = Instant::now();

    let value = f().map_err(|e| {
        log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
    Ok(value)
}

/// Borrow a persisted instance for reading, together with its id
///
/// # Errors
/// `Concurrency` if the handle is mutably borrowed, `Detached` if it has no
/// id.
pub(crate) fn persisted<T: Persistent>(handle: &Shared<T>) -> Result<(Ref<'_, T>, i64)> {
    let value = handle
        .try_borrow()
        .map_err(|_| RosterError::HandleBorrowed { entity: T::ENTITY })?;
    let id = value
        .id()
        .ok_or(RosterError::Detached { entity: T::ENTITY })?;
    Ok((value, id))
}

/// Delete the row behind `handle`, evict it and detach it
///
/// When the instance cached under the same id is not `handle` itself, it is
/// detached as well, so no live object keeps an id whose row is gone. Both
/// are borrowed before the row is deleted; a borrow conflict changes nothing.
///
/// # Errors
/// `Concurrency` on a borrow conflict, `Detached` if the handle has no id,
/// `NotFound` if the row is already gone.
pub(crate) fn delete_instance<T: Persistent>(
    conn: &Connection,
    cache: &IdentityMap<T>,
    handle: &Shared<T>,
    delete_sql: &str,
) -> Result<i64> {
    let mut target = handle
        .try_borrow_mut()
        .map_err(|_| RosterError::HandleBorrowed { entity: T::ENTITY })?;
    let id = target
        .id()
        .ok_or(RosterError::Detached { entity: T::ENTITY })?;

    let cached_handle = cache.get(id).filter(|cached| !Rc::ptr_eq(cached, handle));
    let mut cached = cached_handle
        .as_ref()
        .map(|cached| cached.try_borrow_mut())
        .transpose()
        .map_err(|_| RosterError::InstanceBorrowed {
            entity: T::ENTITY,
            id,
        })?;

    let changed = conn.execute(delete_sql, [id]).map_err(from_rusqlite)?;
    if changed == 0 {
        return Err(RosterError::RowNotFound {
            entity: T::ENTITY,
            id,
        }
        .into());
    }

    cache.evict(id);
    target.detach();
    if let Some(cached) = cached.as_mut() {
        cached.detach();
    }
    Ok(id)
}
