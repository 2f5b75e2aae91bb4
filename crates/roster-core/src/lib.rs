//! # roster-core: Pure Domain Logic for Roster
//!
//! This crate holds the employee record type and everything that can be
//! decided about it without touching storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Roster Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (not in this workspace)         │   │
//! │  │    Table view ──► Input form ──► Row removal gesture            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ roster-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────────┐  ┌───────────┐            │   │
//! │  │   │   types   │  │   types        │  │ validation│            │   │
//! │  │   │  Employee │  │ EmployeeIdPool │  │   rules   │            │   │
//! │  │   └───────────┘  └────────────────┘  └───────────┘            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO GLOBAL STATE                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    roster-db (Database Layer)                   │   │
//! │  │              Statement lifecycle, mapper, Store                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Employee, EmployeeDraft, EmployeeIdPool
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use roster_core::{EmployeeDraft, EmployeeIdPool};
//!
//! let mut ids = EmployeeIdPool::default();
//! let ann = EmployeeDraft::parse("Ann", "30", "Eng")
//!     .unwrap()
//!     .into_employee(None, &mut ids)
//!     .unwrap();
//!
//! assert_eq!(ann.describe_row(), "| 1 | Ann | 30 | Eng |");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of form-entered text.
///
/// Matches the `CHAR(255)` declaration of `Name` and `Department`. SQLite
/// does not enforce it and neither does the store; only
/// [`EmployeeDraft::parse`] applies it.
pub const MAX_TEXT_LEN: usize = 255;
