//! Review repository
//!
//! Maps the `reviews` table to identity-mapped [`Review`] instances. The
//! employee mapper reaches reviews only through this repository's
//! [`RowMaterializer`] implementation.

use rusqlite::Connection;

use roster_core::errors::RosterError;
use roster_core::Persistent;
use roster_core::{Employee, EmployeeLookup, IdentityMap, Review, ReviewRow, Shared};

use crate::errors::{from_rusqlite, Result};
use crate::repo::materialize::{fetch_one, materialize_all, RowMaterializer};
use crate::repo::{delete_instance, logged, persisted};

const ENTITY: &str = Review::ENTITY;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INT,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employees(id))";

const SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

/// SQLite repository for Reviews
pub struct ReviewRepo<'c> {
    conn: &'c Connection,
    cache: IdentityMap<Review>,
}

impl<'c> ReviewRepo<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            cache: IdentityMap::new(),
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<Review> {
        &self.cache
    }

    pub fn create_table(&self) -> Result<()> {
        logged("review.create_table", || {
            self.conn
                .execute(CREATE_TABLE_SQL, [])
                .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    pub fn drop_table(&self) -> Result<()> {
        logged("review.drop_table", || {
            self.conn
                .execute("DROP TABLE IF EXISTS reviews", [])
                .map_err(from_rusqlite)?;
            self.cache.clear();
            Ok(())
        })
    }

    pub fn save(&self, mut review: Review) -> Result<Shared<Review>> {
        logged("review.save", || {
            self.conn
                .execute(
                    "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3)",
                    rusqlite::params![review.year(), review.summary(), review.employee_id()],
                )
                .map_err(from_rusqlite)?;

            let id = self.conn.last_insert_rowid();
            review.assign_id(id);
            tracing::debug!(review_id = id, "review inserted");
            Ok(self.cache.register(id, review))
        })
    }

    /// Build a review for an existing employee and save it
    ///
    /// # Errors
    /// `Validation` before anything is written; `Persistence` on insert.
    pub fn create(
        &self,
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
        employees: &dyn EmployeeLookup,
    ) -> Result<Shared<Review>> {
        let review = Review::new(year, summary, employee_id, employees)?;
        self.save(review)
    }

    /// Canonical instance for `row`, refreshed in place when cached
    pub fn instance_from_db(&self, row: ReviewRow) -> Result<Shared<Review>> {
        let id = row.id;
        if let Some(existing) = self.cache.get(id) {
            existing
                .try_borrow_mut()
                .map_err(|_| RosterError::InstanceBorrowed { entity: ENTITY, id })?
                .refresh(row)?;
            return Ok(existing);
        }

        let review = Review::from_row(row)?;
        Ok(self.cache.register(id, review))
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Shared<Review>>> {
        let sql = format!("{} WHERE id = ?1", SELECT_SQL);
        fetch_one::<ReviewRow, _>(self.conn, &sql, [id])?
            .map(|row| self.instance_from_db(row))
            .transpose()
    }

    pub fn get_all(&self) -> Result<Vec<Shared<Review>>> {
        materialize_all(self.conn, SELECT_SQL, [], self)
    }

    /// # Errors
    /// `Detached` if the review has no id, `NotFound` if its row is gone.
    pub fn update(&self, review: &Shared<Review>) -> Result<()> {
        logged("review.update", || {
            let (review, id) = persisted(review)?;

            let changed = self
                .conn
                .execute(
                    "UPDATE reviews SET year = ?1, summary = ?2, employee_id = ?3 WHERE id = ?4",
                    rusqlite::params![review.year(), review.summary(), review.employee_id(), id],
                )
                .map_err(from_rusqlite)?;

            if changed == 0 {
                return Err(RosterError::RowNotFound { entity: ENTITY, id }.into());
            }
            Ok(())
        })
    }

    /// # Errors
    /// `Detached` if the review has no id, `NotFound` if its row is gone.
    pub fn delete(&self, review: &Shared<Review>) -> Result<()> {
        logged("review.delete", || {
            let id = delete_instance(
                self.conn,
                &self.cache,
                review,
                "DELETE FROM reviews WHERE id = ?1",
            )?;
            tracing::debug!(review_id = id, "review deleted");
            Ok(())
        })
    }

    /// The employee who received `review`, if it still exists
    pub fn employee(
        &self,
        review: &Shared<Review>,
        employees: &dyn EmployeeLookup,
    ) -> Result<Option<Shared<Employee>>> {
        let employee_id = review.borrow().employee_id();
        employees.find_employee(employee_id)
    }
}

impl RowMaterializer for ReviewRepo<'_> {
    type Entity = Review;
    type Row = ReviewRow;

    fn instance_from_db(&self, row: ReviewRow) -> Result<Shared<Review>> {
        ReviewRepo::instance_from_db(self, row)
    }
}
