//! # Employee Store
//!
//! Owns the database connection and exposes CRUD on the Employees table.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store State Machine                             │
//! │                                                                         │
//! │   (no value)  ── Store::open / Store::connect ──►  Store (Open)         │
//! │                                                     │                   │
//! │                     insert / fetch_all / fetch_by_id / delete_by_id     │
//! │                                                     │                   │
//! │   (no value)  ◄── store.close() or drop ────────────┘                   │
//! │                                                                         │
//! │  `close` consumes the store, so a closed store cannot be used.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Connection, One Owner
//! Every operation takes `&mut self`: calls on one store are serialized by
//! the borrow checker. For access from several tasks wrap the store in a
//! [`SharedStore`](crate::SharedStore).

use roster_core::Employee;
use sqlx::{Connection, Row, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{DbError, DbResult};
use crate::mapper;
use crate::schema;
use crate::statement::{Statement, StepOutcome};

const INSERT_EMPLOYEE: &str =
    "INSERT INTO Employees (Id, Name, Age, Department) VALUES (?1, ?2, ?3, ?4)";

const SELECT_ALL_EMPLOYEES: &str = "SELECT Id, Name, Age, Department FROM Employees";

const SELECT_EMPLOYEE_BY_ID: &str =
    "SELECT Id, Name, Age, Department FROM Employees WHERE Id = ?1";

const UPDATE_EMPLOYEE: &str =
    "UPDATE Employees SET Name = ?2, Age = ?3, Department = ?4 WHERE Id = ?1";

const DELETE_EMPLOYEE_BY_ID: &str = "DELETE FROM Employees WHERE Id = ?1";

const COUNT_EMPLOYEES: &str = "SELECT COUNT(*) FROM Employees";

// Touches the file header; fails with "file is not a database" on garbage.
const PROBE: &str = "SELECT COUNT(*) FROM sqlite_master";

/// Employee record store backed by one SQLite connection.
///
/// ## Usage
/// ```rust,ignore
/// let mut store = Store::open("/tmp/t.db").await?;
/// store.create_schema().await?;
/// store.insert(&Employee::new(1, "Ann", 30, "Eng")).await?;
/// let all = store.fetch_all().await?;
/// store.delete_by_id(1).await?;
/// store.close().await;
/// ```
pub struct Store {
    conn: SqliteConnection,
    path: PathBuf,
}

impl Store {
    /// Opens (creating if absent) the database file at `path`.
    ///
    /// The schema is not touched; call [`create_schema`](Self::create_schema).
    ///
    /// ## Returns
    /// * `Ok(Store)` - Open store
    /// * `Err(DbError::Open)` - File can't be opened or isn't a database
    pub async fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Store::connect(StoreConfig::new(path.as_ref()).create_schema(false)).await
    }

    /// Opens a store with full configuration.
    ///
    /// ## What This Does
    /// 1. Opens the database file (creating it if configured)
    /// 2. Reads the schema table to verify it is a SQLite database
    /// 3. Creates the Employees table (if `config.create_schema`)
    pub async fn connect(config: StoreConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening employee store"
        );

        let options = config.connect_options()?;
        let mut conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(DbError::open)?;

        sqlx::query_scalar::<_, i64>(PROBE)
            .fetch_one(&mut conn)
            .await
            .map_err(DbError::open)?;

        let mut store = Store {
            conn,
            path: config.database_path,
        };

        if config.create_schema {
            store.create_schema().await?;
        }

        Ok(store)
    }

    /// Path the store was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the Employees table if it doesn't exist. Idempotent.
    pub async fn create_schema(&mut self) -> DbResult<()> {
        schema::create_schema(&mut self.conn).await
    }

    /// Inserts a new employee.
    ///
    /// Any `i32` age and any text are stored as given.
    ///
    /// ## Returns
    /// * `Ok(())` - Row written
    /// * `Err(DbError::Step)` - Id already exists (see
    ///   [`DbError::is_constraint_violation`]) or the write failed
    pub async fn insert(&mut self, employee: &Employee) -> DbResult<()> {
        debug!(id = employee.id(), "Inserting employee");

        let mut stmt = Statement::prepare(&mut self.conn, INSERT_EMPLOYEE).await?;
        stmt.bind_all(mapper::to_bind_parameters(employee))?;

        match stmt.step().await {
            Ok(_) => {}
            Err(e) if e.is_constraint_violation() => {
                warn!(id = employee.id(), error = %e, "Employee id already taken");
                return Err(e);
            }
            Err(e) => return Err(e),
        }
        stmt.release();

        Ok(())
    }

    /// Fetches every employee in the table's natural row order.
    ///
    /// An empty table gives an empty vector.
    pub async fn fetch_all(&mut self) -> DbResult<Vec<Employee>> {
        let mut stmt = Statement::prepare(&mut self.conn, SELECT_ALL_EMPLOYEES).await?;

        let mut employees = Vec::new();
        while stmt.step().await? == StepOutcome::RowAvailable {
            employees.push(mapper::from_row(stmt.row()?)?);
        }
        stmt.release();

        debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    /// Gets an employee by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Employee))` - Employee found
    /// * `Ok(None)` - No such employee
    pub async fn fetch_by_id(&mut self, id: i32) -> DbResult<Option<Employee>> {
        let mut stmt = Statement::prepare(&mut self.conn, SELECT_EMPLOYEE_BY_ID).await?;
        stmt.bind_int(1, id)?;

        let employee = match stmt.step().await? {
            StepOutcome::RowAvailable => Some(mapper::from_row(stmt.row()?)?),
            StepOutcome::Done => None,
        };
        stmt.release();

        debug!(id, found = employee.is_some(), "Fetched employee by id");
        Ok(employee)
    }

    /// Rewrites name, age and department of the row with `employee.id()`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Row updated
    /// * `Ok(false)` - No row has that id
    pub async fn update(&mut self, employee: &Employee) -> DbResult<bool> {
        debug!(id = employee.id(), "Updating employee");

        let mut stmt = Statement::prepare(&mut self.conn, UPDATE_EMPLOYEE).await?;
        stmt.bind_all(mapper::to_bind_parameters(employee))?;
        stmt.step().await?;
        let changes = stmt.changes();
        stmt.release();

        Ok(changes > 0)
    }

    /// Deletes the employee with `id`.
    ///
    /// Deleting an id that isn't stored succeeds and changes nothing; the
    /// return value does not tell the two cases apart.
    pub async fn delete_by_id(&mut self, id: i32) -> DbResult<()> {
        let mut stmt = Statement::prepare(&mut self.conn, DELETE_EMPLOYEE_BY_ID).await?;
        stmt.bind_int(1, id)?;
        stmt.step().await?;
        let changes = stmt.changes();
        stmt.release();

        debug!(id, changes, "Deleted employee");
        Ok(())
    }

    /// Counts stored employees (for diagnostics).
    pub async fn count(&mut self) -> DbResult<i64> {
        let mut stmt = Statement::prepare(&mut self.conn, COUNT_EMPLOYEES).await?;
        stmt.step().await?;
        let count = stmt
            .row()?
            .try_get::<i64, _>(0)
            .map_err(|e| DbError::malformed(0, e.to_string()))?;
        stmt.release();

        Ok(count)
    }

    /// Checks if the database is responsive.
    pub async fn health_check(&mut self) -> bool {
        self.conn.ping().await.is_ok()
    }

    /// Closes the connection.
    ///
    /// Dropping the store also closes it; `close` additionally waits for the
    /// engine to finish and logs the outcome.
    pub async fn close(self) {
        info!(path = %self.path.display(), "Closing employee store");
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "Employee store did not close cleanly");
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> Store {
        Store::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let mut store = memory_store().await;
        assert!(store.health_check().await);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_before_schema_is_prepare_error() {
        let mut store = Store::connect(StoreConfig::in_memory().create_schema(false))
            .await
            .unwrap();
        let err = store.fetch_all().await.unwrap_err();
        assert!(matches!(err, DbError::Prepare { ref message } if message.contains("no such table")));
    }

    #[tokio::test]
    async fn test_update() {
        let mut store = memory_store().await;
        let mut ann = Employee::new(1, "Ann", 30, "Eng");
        store.insert(&ann).await.unwrap();

        ann.department = "Ops".to_string();
        ann.age = 31;
        assert!(store.update(&ann).await.unwrap());
        assert_eq!(store.fetch_by_id(1).await.unwrap(), Some(ann));

        let ghost = Employee::new(99, "Ghost", 1, "None");
        assert!(!store.update(&ghost).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_stores_any_age_and_text() {
        let mut store = memory_store().await;
        let records = [
            Employee::new(1, "  ", -1, ""),
            Employee::new(2, "N".repeat(300), i32::MIN, "D".repeat(1000)),
            Employee::new(3, "Old", i32::MAX, "Eng"),
        ];
        for record in &records {
            store.insert(record).await.unwrap();
        }
        assert_eq!(store.fetch_all().await.unwrap(), records.to_vec());
    }

    #[tokio::test]
    async fn test_update_stores_any_age_and_text() {
        let mut store = memory_store().await;
        store.insert(&Employee::new(1, "Ann", 30, "Eng")).await.unwrap();

        let edits = [
            (i32::MIN, "x".repeat(300)),
            (i32::MAX, String::new()),
            (-1, "Ann".to_string()),
        ];
        for (age, name) in edits {
            let edited = Employee::new(1, name, age, "Q".repeat(256));
            assert!(store.update(&edited).await.unwrap());
            assert_eq!(store.fetch_by_id(1).await.unwrap(), Some(edited));
        }
    }

    #[tokio::test]
    async fn test_malformed_row_surfaces() {
        let mut store = memory_store().await;
        sqlx::query("INSERT INTO Employees (Id, Name, Age, Department) VALUES (1, NULL, 30, 'Eng')")
            .execute(&mut store.conn)
            .await
            .unwrap();

        let err = store.fetch_all().await.unwrap_err();
        assert!(matches!(err, DbError::MalformedRow { column: 1, .. }));
        assert!(matches!(
            store.fetch_by_id(1).await,
            Err(DbError::MalformedRow { column: 1, .. })
        ));
    }
}
