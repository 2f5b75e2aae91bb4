//! # roster-db: Database Layer for Roster
//!
//! This crate stores [`Employee`](roster_core::Employee) records in a local
//! SQLite file through a single connection.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Roster Data Flow                                 │
//! │                                                                         │
//! │  Presentation layer (list / add / delete)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     roster-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │    Mapper     │    │  Statement   │  │   │
//! │  │   │  (store.rs)   │───►│  (mapper.rs)  │    │(statement.rs)│  │   │
//! │  │   │               │    │ Employee ⇄    │    │ prepare/bind │  │   │
//! │  │   │ insert, fetch │───────────────────────►│ step/release │  │   │
//! │  │   │ delete, close │    │ params / row  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     Employees table                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Store configuration
//! - [`statement`] - Prepared-statement lifecycle
//! - [`mapper`] - Employee ⇄ parameters / row columns
//! - [`schema`] - The Employees table
//! - [`store`] - CRUD surface
//! - [`shared`] - Mutex-guarded handle for concurrent callers
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_core::Employee;
//! use roster_db::Store;
//!
//! let mut store = Store::open("/tmp/t.db").await?;
//! store.create_schema().await?;
//! store.insert(&Employee::new(1, "Ann", 30, "Eng")).await?;
//! assert_eq!(store.fetch_all().await?.len(), 1);
//! store.delete_by_id(1).await?;
//! store.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod mapper;
pub mod schema;
pub mod shared;
pub mod statement;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{DbError, DbResult};
pub use shared::SharedStore;
pub use statement::{SqlValue, Statement, StepOutcome};
pub use store::Store;
