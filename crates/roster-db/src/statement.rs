//! # Statement Lifecycle
//!
//! Compile → bind → step → release for any SQL text.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Statement, One Operation                         │
//! │                                                                         │
//! │  Statement::prepare(conn, sql)   ← compiles; PrepareError on bad SQL   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bind_int / bind_text (1-based)  ← BindError on bad position           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  step() ──► RowAvailable ──► row() ──► step() ...                      │
//! │       │                                                                 │
//! │       └──► Done                  ← StepError on anything else          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  release() / drop                ← exactly once, on every exit path    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Statement` mutably borrows the connection for its whole life, so at
//! most one statement per connection exists at a time. Releasing is tied to
//! drop: an early `?` return releases the statement just like the success
//! path does.

use futures::stream::BoxStream;
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteArguments, SqliteConnection, SqliteQueryResult, SqliteRow};
use sqlx::{Arguments, Either, Executor, Statement as _};
use tracing::trace;

use crate::error::{DbError, DbResult};

type RowStream<'c> = BoxStream<'c, Result<Either<SqliteQueryResult, SqliteRow>, sqlx::Error>>;

/// Result of advancing a statement by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A row was produced; read it with [`Statement::row`].
    RowAvailable,
    /// Execution is complete.
    Done,
}

/// A typed value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
}

/// A compiled SQL statement borrowing its connection.
pub struct Statement<'c> {
    sql: &'c str,
    // Taken when execution starts; the row stream owns the borrow after that.
    conn: Option<&'c mut SqliteConnection>,
    params: Vec<Option<SqlValue>>,
    rows: Option<RowStream<'c>>,
    current: Option<SqliteRow>,
    changes: u64,
    finished: bool,
}

impl<'c> Statement<'c> {
    /// Compiles `sql` against `conn`.
    ///
    /// ## Returns
    /// * `Ok(Statement)` - Ready for binding
    /// * `Err(DbError::Prepare)` - Engine rejected the SQL text
    pub async fn prepare(conn: &'c mut SqliteConnection, sql: &'c str) -> DbResult<Statement<'c>> {
        // sqlx-sqlite executes from SQL text; the compiled handle only
        // supplies the parameter count.
        let parameter_count = {
            let compiled = (&mut *conn).prepare(sql).await.map_err(DbError::prepare)?;
            match compiled.parameters() {
                Some(Either::Left(types)) => types.len(),
                Some(Either::Right(count)) => count,
                None => 0,
            }
        };

        trace!(sql, parameters = parameter_count, "Statement prepared");

        Ok(Statement {
            sql,
            conn: Some(conn),
            params: vec![None; parameter_count],
            rows: None,
            current: None,
            changes: 0,
            finished: false,
        })
    }

    /// Number of `?` parameters in the SQL text.
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    /// Binds an integer to a 1-based parameter position.
    pub fn bind_int(&mut self, position: usize, value: i32) -> DbResult<()> {
        self.bind(position, SqlValue::Int(value))
    }

    /// Binds text to a 1-based parameter position.
    pub fn bind_text(&mut self, position: usize, value: impl Into<String>) -> DbResult<()> {
        self.bind(position, SqlValue::Text(value.into()))
    }

    /// Binds `values` to positions 1, 2, 3, ... in order.
    pub fn bind_all(&mut self, values: impl IntoIterator<Item = SqlValue>) -> DbResult<()> {
        for (index, value) in values.into_iter().enumerate() {
            self.bind(index + 1, value)?;
        }
        Ok(())
    }

    /// Binds a value to a 1-based parameter position.
    ///
    /// Rebinding a position before the first step replaces the value.
    /// Positions left unbound execute as NULL.
    pub fn bind(&mut self, position: usize, value: SqlValue) -> DbResult<()> {
        if self.rows.is_some() || self.finished {
            return Err(DbError::Bind {
                message: "statement is already executing".to_string(),
            });
        }

        let count = self.params.len();
        let slot = position
            .checked_sub(1)
            .and_then(|index| self.params.get_mut(index))
            .ok_or_else(|| DbError::Bind {
                message: format!("parameter {position} out of range (statement has {count})"),
            })?;

        *slot = Some(value);
        Ok(())
    }

    /// Advances the statement by one row.
    ///
    /// The first call executes the statement with the bound parameters.
    /// Once `Done` or an error has been returned, further calls return
    /// `Done`.
    pub async fn step(&mut self) -> DbResult<StepOutcome> {
        if self.finished {
            return Ok(StepOutcome::Done);
        }

        if self.rows.is_none() {
            self.start()?;
        }

        loop {
            let next = match self.rows.as_mut() {
                Some(rows) => rows.try_next().await,
                None => Ok(None),
            };

            match next {
                Ok(Some(Either::Left(result))) => {
                    self.changes += result.rows_affected();
                }
                Ok(Some(Either::Right(row))) => {
                    self.current = Some(row);
                    return Ok(StepOutcome::RowAvailable);
                }
                Ok(None) => {
                    self.finish();
                    return Ok(StepOutcome::Done);
                }
                Err(err) => {
                    self.finish();
                    return Err(DbError::step(err));
                }
            }
        }
    }

    /// Returns the row produced by the last `step`.
    pub fn row(&self) -> DbResult<&SqliteRow> {
        self.current.as_ref().ok_or_else(|| DbError::Step {
            message: "no row available".to_string(),
        })
    }

    /// Rows inserted, updated or deleted by this statement so far.
    pub fn changes(&self) -> u64 {
        self.changes
    }

    /// Releases the statement.
    ///
    /// Equivalent to dropping it; exists so call sites can end the
    /// lifecycle explicitly.
    pub fn release(self) {
        drop(self);
    }

    fn start(&mut self) -> DbResult<()> {
        let conn = self.conn.take().ok_or_else(|| DbError::Step {
            message: "statement has no connection".to_string(),
        })?;

        let mut args = SqliteArguments::default();
        for value in &self.params {
            let added = match value {
                Some(SqlValue::Int(v)) => args.add(*v),
                Some(SqlValue::Text(v)) => args.add(v.clone()),
                None => args.add(Option::<i32>::None),
            };
            added.map_err(|e| DbError::Bind {
                message: e.to_string(),
            })?;
        }

        let query = sqlx::query_with(self.sql, args).persistent(false);
        self.rows = Some(conn.fetch_many(query));
        Ok(())
    }

    fn finish(&mut self) {
        self.rows = None;
        self.current = None;
        self.finished = true;
    }
}

impl Drop for Statement<'_> {
    fn drop(&mut self) {
        trace!(sql = self.sql, changes = self.changes, "Statement released");
    }
}

impl std::fmt::Debug for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("sql", &self.sql)
            .field("params", &self.params)
            .field("executing", &self.rows.is_some())
            .field("finished", &self.finished)
            .finish()
    }
}
