//! # Record Mapper
//!
//! Pure translation between [`Employee`] and statement parameters / result
//! columns. Column order is fixed and matches the `Employees` table:
//!
//! | index | column       | type |
//! |-------|--------------|------|
//! | 0     | `Id`         | int  |
//! | 1     | `Name`       | text |
//! | 2     | `Age`        | int  |
//! | 3     | `Department` | text |

use roster_core::Employee;
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Decode, Row, Type};

use crate::error::{DbError, DbResult};
use crate::statement::SqlValue;

pub const ID_COLUMN: usize = 0;
pub const NAME_COLUMN: usize = 1;
pub const AGE_COLUMN: usize = 2;
pub const DEPARTMENT_COLUMN: usize = 3;

/// Parameters for `INSERT INTO Employees (Id, Name, Age, Department)`.
pub fn to_bind_parameters(employee: &Employee) -> [SqlValue; 4] {
    [
        SqlValue::Int(employee.id()),
        SqlValue::Text(employee.name.clone()),
        SqlValue::Int(employee.age),
        SqlValue::Text(employee.department.clone()),
    ]
}

/// Materializes an employee from a `SELECT Id, Name, Age, Department` row.
///
/// ## Returns
/// * `Err(DbError::MalformedRow)` - a column is missing, NULL, or of the
///   wrong type
pub fn from_row(row: &SqliteRow) -> DbResult<Employee> {
    let id: i32 = column(row, ID_COLUMN)?;
    let name: String = column(row, NAME_COLUMN)?;
    let age: i32 = column(row, AGE_COLUMN)?;
    let department: String = column(row, DEPARTMENT_COLUMN)?;

    Ok(Employee::new(id, name, age, department))
}

// Decodes through Option so NULL is reported instead of becoming 0 or "".
fn column<'r, T>(row: &'r SqliteRow, index: usize) -> DbResult<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get::<Option<T>, _>(index)
        .map_err(|e| DbError::malformed(index, e.to_string()))?
        .ok_or_else(|| DbError::malformed(index, "unexpected NULL"))
}
