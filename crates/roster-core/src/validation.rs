//! # Validation Module
//!
//! Checks for text typed into an employee input form. Records built in code
//! are not subject to these rules; the store accepts any `i32` age and any
//! text.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input form (presentation layer)                              │
//! │  └── Collects name / age / department as text                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, CHAR(255) width                                  │
//! │  └── Age parsed as a whole i32                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── PRIMARY KEY NOT NULL on Id                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use roster_core::validation::{validate_name, parse_age};
//!
//! validate_name("Ann").unwrap();
//! assert_eq!(parse_age("30").unwrap(), 30);
//! ```

use crate::error::ValidationError;
use crate::MAX_TEXT_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an employee name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 255 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name)
}

/// Validates a department name. Same rules as [`validate_name`].
pub fn validate_department(department: &str) -> ValidationResult<()> {
    validate_text("department", department)
}

fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses an age typed into a text field.
///
/// ## Example
/// ```rust
/// use roster_core::validation::parse_age;
///
/// assert_eq!(parse_age(" 42 ").unwrap(), 42);
/// assert!(parse_age("").is_err());
/// assert!(parse_age("4x").is_err());
/// assert_eq!(parse_age("-1").unwrap(), -1);
/// ```
pub fn parse_age(text: &str) -> ValidationResult<i32> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "age".to_string(),
        });
    }

    text.parse::<i32>()
        .map_err(|e| ValidationError::InvalidFormat {
            field: "age".to_string(),
            reason: e.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ann").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(255)).is_ok());
        assert!(matches!(
            validate_name(&"a".repeat(256)),
            Err(ValidationError::TooLong { max: 255, .. })
        ));
    }

    #[test]
    fn test_text_length_counts_characters_not_bytes() {
        // 255 two-byte characters still fit
        assert!(validate_department(&"é".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_department_field_name() {
        let err = validate_department("").unwrap_err();
        assert_eq!(err.to_string(), "department is required");
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("30").unwrap(), 30);
        assert!(matches!(parse_age(""), Err(ValidationError::Required { .. })));
        assert!(matches!(
            parse_age("99999999999"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(parse_age("200").unwrap(), 200);
        assert_eq!(parse_age("-2147483648").unwrap(), i32::MIN);
    }
}
