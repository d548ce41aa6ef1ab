//! Row decoding and materialization
//!
//! `FromSqlRow` turns a SQLite row into a plain row struct. A
//! `RowMaterializer` turns that row struct into the canonical, identity-mapped
//! instance. Mappers that traverse a relationship depend only on the
//! target's `RowMaterializer`, never on the concrete target repository.

use rusqlite::{Connection, OptionalExtension, Params};

use roster_core::{DepartmentRow, EmployeeRow, ReviewRow, Shared};

use crate::errors::{from_rusqlite, Result};

/// Decode one result row, columns in table order
pub trait FromSqlRow: Sized {
    fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;
}

impl FromSqlRow for EmployeeRow {
    fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(EmployeeRow {
            id: row.get(0)?,
            name: row.get(1)?,
            job_title: row.get(2)?,
            department_id: row.get(3)?,
        })
    }
}

impl FromSqlRow for DepartmentRow {
    fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DepartmentRow {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
        })
    }
}

impl FromSqlRow for ReviewRow {
    fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(ReviewRow {
            id: row.get(0)?,
            year: row.get(1)?,
            summary: row.get(2)?,
            employee_id: row.get(3)?,
        })
    }
}

/// Produces the canonical instance for a decoded row
pub trait RowMaterializer {
    type Entity;
    type Row: FromSqlRow;

    /// Return the live instance for `row.id`, refreshed from `row`, or
    /// register a new one.
    fn instance_from_db(&self, row: Self::Row) -> Result<Shared<Self::Entity>>;
}

/// Fetch the first matching row, if any
pub(crate) fn fetch_one<R: FromSqlRow, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Option<R>> {
    conn.query_row(sql, params, R::from_sql_row)
        .optional()
        .map_err(from_rusqlite)
}

/// Whether `sql` yields at least one row; nothing is decoded
pub(crate) fn row_exists<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<bool> {
    conn.query_row(sql, params, |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(from_rusqlite)
}

/// Fetch every matching row in store iteration order
pub(crate) fn fetch_all<R: FromSqlRow, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<R>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(params, R::from_sql_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

/// Fetch rows, then materialize each through `materializer`
///
/// The statement is finished before materialization starts, so
/// materializers are free to issue their own lookups.
pub(crate) fn materialize_all<M: RowMaterializer, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    materializer: &M,
) -> Result<Vec<Shared<M::Entity>>> {
    fetch_all::<M::Row, P>(conn, sql, params)?
        .into_iter()
        .map(|row| materializer.instance_from_db(row))
        .collect()
}
