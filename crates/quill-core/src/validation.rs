//! # Validation Module
//!
//! Precondition checks run at the boundary of invoice generation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input (CLI / JSON)                                           │
//! │  ├── Type checks (deserialization, decimal places)                     │
//! │  └── billable_items(): blank rows are dropped, not rejected            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (validate_request)                               │
//! │  ├── Required text fields                                              │
//! │  ├── 1..=MAX_LINE_ITEMS items, each billable and within MAX_AMOUNT     │
//! │  └── Discount and tax within 0..=100                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: quill-pdf builds the document, trusting the request          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use quill_core::validation::validate_request;
//! use quill_core::{InvoiceRequest, LineItem, Money, Percent};
//!
//! let request = InvoiceRequest {
//!     company_name: "Acme Traders".to_string(),
//!     billed_to: "Globex".to_string(),
//!     invoice_number: "INV-001".to_string(),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
//!     items: vec![LineItem::new("Widget", 2, Money::from_cents(999))],
//!     discount_percent: Percent::zero(),
//!     tax_percent: Percent::from_whole(18),
//! };
//! assert!(validate_request(&request).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{InvoiceRequest, LineItem, Percent};
use crate::MAX_LINE_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Request Validator
// =============================================================================

/// Checks every precondition the document builder relies on.
///
/// Checks run in form order and the first failure is returned.
pub fn validate_request(request: &InvoiceRequest) -> ValidationResult<()> {
    validate_required("company_name", &request.company_name)?;
    validate_required("billed_to", &request.billed_to)?;
    validate_required("invoice_number", &request.invoice_number)?;
    validate_items(&request.items)?;
    validate_percent("discount_percent", request.discount_percent)?;
    validate_percent("tax_percent", request.tax_percent)?;
    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a percentage is within 0..=100.
pub fn validate_percent(field: &str, value: Percent) -> ValidationResult<()> {
    if value > Percent::hundred() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates the item list.
///
/// ## Rules
/// - At least one item
/// - No more than MAX_LINE_ITEMS (5)
/// - Every item has a name, a positive quantity and a positive unit price
/// - Neither the unit price nor the line total exceeds `Money::MAX_AMOUNT`
pub fn validate_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    if items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::TooManyItems {
            max: MAX_LINE_ITEMS,
        });
    }

    for (position, item) in items.iter().enumerate() {
        let reason = if item.name.trim().is_empty() {
            Some("name is required".to_string())
        } else if item.quantity == 0 {
            Some("quantity must be positive".to_string())
        } else if !item.unit_price.is_positive() {
            Some("unit price must be positive".to_string())
        } else if item.unit_price > Money::MAX_AMOUNT {
            Some(format!("unit price cannot exceed {}", Money::MAX_AMOUNT))
        } else if item.line_total() > Money::MAX_AMOUNT {
            Some(format!("line total cannot exceed {}", Money::MAX_AMOUNT))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(ValidationError::InvalidItem {
                index: position + 1,
                reason,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Form Filtering
// =============================================================================

/// Keeps only rows the invoice form would include, preserving order.
///
/// The form offers fixed item slots; an untouched slot has an empty name
/// and zero quantity/price and must not end up on the invoice.
pub fn billable_items(items: Vec<LineItem>) -> Vec<LineItem> {
    items.into_iter().filter(LineItem::is_billable).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
