//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorized by lifecycle phase                │
//! │       │                  open / prepare / bind / step / row mapping    │
//! │       ▼                                                                 │
//! │  Store operation returns it unchanged                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer shows an actionable message                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lookup that finds nothing is not an error: `fetch_by_id` returns
//! `Ok(None)`.

use thiserror::Error;

/// Database operation errors.
///
/// The variant tells which phase of the statement lifecycle failed; the
/// message is the engine's own diagnostic text.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened.
    ///
    /// ## When This Occurs
    /// - Parent directory doesn't exist
    /// - File permissions issue
    /// - File exists but is not a SQLite database
    #[error("Unable to open database: {message}")]
    Open { message: String },

    /// SQL text was rejected at compile time.
    ///
    /// ## When This Occurs
    /// - Syntax error
    /// - Table doesn't exist yet (schema not created)
    #[error("Statement could not be prepared: {message}")]
    Prepare { message: String },

    /// A parameter could not be bound.
    ///
    /// ## When This Occurs
    /// - Position outside `1..=parameter_count`
    /// - Statement already executing
    #[error("Could not bind parameter: {message}")]
    Bind { message: String },

    /// Execution failed.
    ///
    /// ## When This Occurs
    /// - Constraint violation (duplicate id)
    /// - Database busy or locked
    /// - Disk / I/O failure
    #[error("Statement execution failed: {message}")]
    Step { message: String },

    /// A result row did not have the expected shape.
    #[error("Malformed row at column {column}: {message}")]
    MalformedRow { column: usize, message: String },
}

impl DbError {
    /// Creates an Open error from an engine error.
    pub fn open(err: sqlx::Error) -> Self {
        DbError::Open {
            message: engine_message(&err),
        }
    }

    /// Creates a Prepare error from an engine error.
    pub fn prepare(err: sqlx::Error) -> Self {
        DbError::Prepare {
            message: engine_message(&err),
        }
    }

    /// Creates a Step error from an engine error.
    pub fn step(err: sqlx::Error) -> Self {
        DbError::Step {
            message: engine_message(&err),
        }
    }

    /// Creates a MalformedRow error.
    pub fn malformed(column: usize, message: impl Into<String>) -> Self {
        DbError::MalformedRow {
            column,
            message: message.into(),
        }
    }

    /// Returns true for a step failure caused by a constraint.
    ///
    /// ## Usage
    /// Inserting a duplicate id is an expected outcome, not a crash:
    /// ```rust,ignore
    /// match store.insert(&employee).await {
    ///     Err(e) if e.is_constraint_violation() => { /* id already taken */ }
    ///     other => other?,
    /// }
    /// ```
    pub fn is_constraint_violation(&self) -> bool {
        // SQLite: "UNIQUE constraint failed: Employees.Id",
        //         "NOT NULL constraint failed: Employees.Id"
        matches!(self, DbError::Step { message } if message.contains("constraint failed"))
    }
}

/// Extracts the diagnostic text SQLite produced, falling back to the
/// driver's description for non-database errors.
fn engine_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        other => other.to_string(),
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
