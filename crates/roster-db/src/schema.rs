//! # Schema
//!
//! The fixed, single-table schema.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Employees                                                              │
//! │  ──────────────────────────────────────────────                         │
//! │  Id          INTEGER PRIMARY KEY NOT NULL                               │
//! │  Name        CHAR(255)                                                  │
//! │  Age         INTEGER                                                    │
//! │  Department  CHAR(255)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no migration system. `IF NOT EXISTS` makes creation safe to run
//! on every startup.

use sqlx::{Row, SqliteConnection};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::statement::{Statement, StepOutcome};

/// Name of the only table.
pub const EMPLOYEES_TABLE: &str = "Employees";

/// DDL for the Employees table.
pub const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Employees (
    Id INTEGER PRIMARY KEY NOT NULL,
    Name CHAR(255),
    Age INTEGER,
    Department CHAR(255)
)
"#;

const TABLE_EXISTS: &str = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

/// Creates the Employees table if it does not exist.
///
/// ## Errors
/// * `DbError::Prepare` / `DbError::Step` - creation failed for a reason
///   other than the table already existing
pub async fn create_schema(conn: &mut SqliteConnection) -> DbResult<()> {
    let mut stmt = Statement::prepare(conn, CREATE_EMPLOYEES_TABLE).await?;
    while stmt.step().await? == StepOutcome::RowAvailable {}
    stmt.release();

    info!(table = EMPLOYEES_TABLE, "Schema ready");
    Ok(())
}

/// Counts tables named `name` (0 or 1).
pub async fn table_count(conn: &mut SqliteConnection, name: &str) -> DbResult<i64> {
    let mut stmt = Statement::prepare(conn, TABLE_EXISTS).await?;
    stmt.bind_text(1, name)?;

    let count = match stmt.step().await? {
        StepOutcome::RowAvailable => {
            let row = stmt.row()?;
            row.try_get::<i64, _>(0)
                .map_err(|e| DbError::malformed(0, e.to_string()))?
        }
        StepOutcome::Done => 0,
    };
    stmt.release();

    Ok(count)
}
