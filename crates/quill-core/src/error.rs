//! # Error Types
//!
//! Domain-specific error types for quill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quill-core errors (this file)                                         │
//! │  ├── CoreError        - Parse failures for amounts and percentages     │
//! │  └── ValidationError  - Invoice request rejected at the boundary       │
//! │                                                                         │
//! │  quill-pdf errors (separate crate)                                     │
//! │  ├── RenderError      - PDF encoding failures                          │
//! │  └── InvoiceError     - Validation OR render                           │
//! │                                                                         │
//! │  Flow: ValidationError → InvoiceError → anyhow (CLI) → stderr          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, item position)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Text could not be read as a monetary amount.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Text could not be read as a percentage.
    #[error("Invalid percentage '{input}': {reason}")]
    InvalidPercent { input: String, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Invoice request validation errors.
///
/// Returned by [`crate::validation::validate_request`] before any document
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// The request has no line items.
    #[error("at least one item is required")]
    NoItems,

    /// More line items than the invoice form offers.
    #[error("an invoice can have at most {max} items")]
    TooManyItems { max: usize },

    /// A line item breaks one of the item rules.
    ///
    /// `index` is 1-based, matching the "Item N" labels on the form.
    #[error("item {index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidAmount {
            input: "1.999".to_string(),
            reason: "at most two decimal places are allowed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount '1.999': at most two decimal places are allowed"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "company_name".to_string(),
        };
        assert_eq!(err.to_string(), "company_name is required");

        let err = ValidationError::InvalidItem {
            index: 2,
            reason: "quantity must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "item 2: quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "discount_percent must be between 0 and 100");
    }
}
