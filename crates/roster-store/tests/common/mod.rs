use rusqlite::Connection;

use roster_store::{db, DepartmentRepo, EmployeeRepo, ReviewRepo};

/// In-memory database with the departments, employees and reviews tables
#[allow(dead_code)]
pub fn setup_test_db() -> Connection {
    let conn = db::open_in_memory().unwrap();
    let departments = DepartmentRepo::new(&conn);
    departments.create_table().unwrap();
    EmployeeRepo::new(&conn, &departments).create_table().unwrap();
    ReviewRepo::new(&conn).create_table().unwrap();
    conn
}

/// Number of rows currently in `table`
#[allow(dead_code)]
pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}
