//! # Domain Types
//!
//! Core domain types used throughout Roster.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  EmployeeDraft  │   │ EmployeeIdPool  │   │    Employee     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  next id        │──►│  id (i32, PK)   │       │
//! │  │  age            │   │  (owned by the  │   │  name           │       │
//! │  │  department     │   │   call site)    │   │  age            │       │
//! │  └─────────────────┘   └─────────────────┘   │  department     │       │
//! │   validated input                            └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is the table's primary key. It is either supplied by the caller or
//! drawn from an [`EmployeeIdPool`] the caller owns. There is no process-wide
//! counter: two pools never share state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{self, ValidationResult};

// =============================================================================
// Employee
// =============================================================================

/// An employee record, the only entity stored by Roster.
///
/// The id has no setter: once a record exists its identity is fixed.
/// Name, age and department are public so an edited copy can be handed to
/// `update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Employee {
    /// Primary key.
    id: i32,

    /// Display name.
    pub name: String,

    /// Age in years.
    pub age: i32,

    /// Department the employee belongs to.
    pub department: String,
}

impl Employee {
    /// Creates an employee with a caller-supplied id.
    pub fn new(id: i32, name: impl Into<String>, age: i32, department: impl Into<String>) -> Self {
        Employee {
            id,
            name: name.into(),
            age,
            department: department.into(),
        }
    }

    /// Returns the primary key.
    #[inline]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Formats the record as one row of a plain-text table.
    ///
    /// ## Example
    /// ```rust
    /// use roster_core::Employee;
    ///
    /// let ann = Employee::new(1, "Ann", 30, "Eng");
    /// assert_eq!(ann.describe_row(), "| 1 | Ann | 30 | Eng |");
    /// ```
    pub fn describe_row(&self) -> String {
        format!(
            "| {} | {} | {} | {} |",
            self.id, self.name, self.age, self.department
        )
    }
}

// =============================================================================
// Employee Draft
// =============================================================================

/// Validated input for a record that has no id yet.
///
/// ## Usage
/// An input form collects three text fields; `parse` validates them and
/// an [`EmployeeIdPool`] completes the record:
/// ```rust
/// use roster_core::{EmployeeDraft, EmployeeIdPool};
///
/// let mut ids = EmployeeIdPool::default();
/// let draft = EmployeeDraft::parse("Ann", "30", "Eng").unwrap();
/// let ann = draft.into_employee(None, &mut ids).unwrap();
/// assert_eq!(ann.id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmployeeDraft {
    pub name: String,
    pub age: i32,
    pub department: String,
}

impl EmployeeDraft {
    /// Parses and validates raw text inputs.
    ///
    /// Name and department are trimmed; age must be a whole number.
    pub fn parse(name: &str, age: &str, department: &str) -> ValidationResult<Self> {
        let name = name.trim();
        let department = department.trim();
        validation::validate_name(name)?;
        let age = validation::parse_age(age)?;
        validation::validate_department(department)?;

        Ok(EmployeeDraft {
            name: name.to_string(),
            age,
            department: department.to_string(),
        })
    }

    /// Completes the draft with `id`, or with the pool's next id when `id`
    /// is `None`. The pool is only advanced when it supplies the id.
    pub fn into_employee(self, id: Option<i32>, ids: &mut EmployeeIdPool) -> CoreResult<Employee> {
        let id = match id {
            Some(id) => id,
            None => ids.allocate()?,
        };
        Ok(Employee::new(id, self.name, self.age, self.department))
    }
}

// =============================================================================
// Employee Id Pool
// =============================================================================

/// Monotonically increasing id source owned by whoever creates records.
///
/// ## Example
/// ```rust
/// use roster_core::{Employee, EmployeeIdPool};
///
/// let stored = vec![Employee::new(4, "Ann", 30, "Eng")];
/// let mut ids = EmployeeIdPool::resume_after(&stored).unwrap();
/// assert_eq!(ids.allocate().unwrap(), 5);
/// assert_eq!(ids.allocate().unwrap(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeIdPool {
    // i64 so that "past i32::MAX" is representable
    next: i64,
}

impl Default for EmployeeIdPool {
    /// Starts at 1.
    fn default() -> Self {
        EmployeeIdPool { next: 1 }
    }
}

impl EmployeeIdPool {
    /// Creates a pool whose first id is `first`.
    pub fn starting_at(first: i32) -> Self {
        EmployeeIdPool {
            next: i64::from(first),
        }
    }

    /// Creates a pool that continues after the largest id in `existing`.
    ///
    /// An empty slice gives the default pool.
    pub fn resume_after(existing: &[Employee]) -> CoreResult<Self> {
        match existing.iter().map(Employee::id).max() {
            Some(i32::MAX) => Err(CoreError::IdPoolExhausted { last: i32::MAX }),
            Some(max) => Ok(EmployeeIdPool::starting_at(max + 1)),
            None => Ok(EmployeeIdPool::default()),
        }
    }

    /// Returns the id the next `allocate` call will hand out, if any.
    pub fn peek(&self) -> Option<i32> {
        i32::try_from(self.next).ok()
    }

    /// Hands out the next id and advances the pool.
    pub fn allocate(&mut self) -> CoreResult<i32> {
        let id = i32::try_from(self.next).map_err(|_| CoreError::IdPoolExhausted { last: i32::MAX })?;
        self.next += 1;
        Ok(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_employee_accessors() {
        let ann = Employee::new(7, "Ann", 30, "Eng");
        assert_eq!(ann.id(), 7);
        assert_eq!(ann.name, "Ann");
        assert_eq!(ann.age, 30);
        assert_eq!(ann.department, "Eng");
    }

    #[test]
    fn test_employee_serializes_with_plain_field_names() {
        let ann = Employee::new(1, "Ann", 30, "Eng");
        let json = serde_json::to_value(&ann).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Ann", "age": 30, "department": "Eng"})
        );
    }

    #[test]
    fn test_id_pool_allocates_in_order() {
        let mut ids = EmployeeIdPool::default();
        assert_eq!(ids.allocate().unwrap(), 1);
        assert_eq!(ids.allocate().unwrap(), 2);
        assert_eq!(ids.peek(), Some(3));
    }

    #[test]
    fn test_pools_do_not_share_state() {
        let mut a = EmployeeIdPool::default();
        let mut b = EmployeeIdPool::default();
        a.allocate().unwrap();
        a.allocate().unwrap();
        assert_eq!(b.allocate().unwrap(), 1);
    }

    #[test]
    fn test_id_pool_exhaustion() {
        let mut ids = EmployeeIdPool::starting_at(i32::MAX);
        assert_eq!(ids.allocate().unwrap(), i32::MAX);
        assert_eq!(ids.peek(), None);
        assert!(matches!(
            ids.allocate(),
            Err(CoreError::IdPoolExhausted { last: i32::MAX })
        ));
    }

    #[test]
    fn test_resume_after() {
        let stored = vec![
            Employee::new(3, "A", 20, "Ops"),
            Employee::new(9, "B", 21, "Ops"),
            Employee::new(5, "C", 22, "Ops"),
        ];
        assert_eq!(EmployeeIdPool::resume_after(&stored).unwrap().peek(), Some(10));
        assert_eq!(EmployeeIdPool::resume_after(&[]).unwrap().peek(), Some(1));

        let full = vec![Employee::new(i32::MAX, "Z", 99, "Ops")];
        assert!(EmployeeIdPool::resume_after(&full).is_err());
    }

    #[test]
    fn test_draft_uses_supplied_id_without_advancing_pool() {
        let mut ids = EmployeeIdPool::default();
        let draft = EmployeeDraft::parse("Ann", "30", "Eng").unwrap();
        let ann = draft.into_employee(Some(42), &mut ids).unwrap();
        assert_eq!(ann.id(), 42);
        assert_eq!(ids.peek(), Some(1));
    }

    #[test]
    fn test_draft_parse_trims_and_rejects() {
        let draft = EmployeeDraft::parse("  Ann ", " 30 ", " Eng ").unwrap();
        assert_eq!(draft.name, "Ann");
        assert_eq!(draft.age, 30);
        assert_eq!(draft.department, "Eng");

        assert!(matches!(
            EmployeeDraft::parse("", "30", "Eng"),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            EmployeeDraft::parse("Ann", "thirty", "Eng"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_describe_row() {
        let bob = Employee::new(2, "Bob", 41, "Sales");
        assert_eq!(bob.describe_row(), "| 2 | Bob | 41 | Sales |");
    }
}
