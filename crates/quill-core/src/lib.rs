//! # quill-core: Pure Business Logic for Quill Invoice
//!
//! This crate contains the invoice arithmetic and validation as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quill Invoice Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`quill`)                           │   │
//! │  │     total ──► generate ──► ask                                  │   │
//! │  └──────────────┬─────────────────────────────┬────────────────────┘   │
//! │                 │                             │                         │
//! │  ┌──────────────▼──────────────┐   ┌──────────▼──────────────────┐     │
//! │  │  quill-pdf (layout, lopdf)  │   │  quill-assist (Gemini)      │     │
//! │  └──────────────┬──────────────┘   └─────────────────────────────┘     │
//! │                 │                                                       │
//! │  ┌──────────────▼──────────────────────────────────────────────────┐   │
//! │  │               ★ quill-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ compute_  │  │  request  │  │   │
//! │  │   │ Request   │  │ rounding  │  │  total    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, InvoiceRequest, Percent)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - Discount and tax calculation
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary checks on an invoice request
//!
//! ## Example Usage
//!
//! ```rust
//! use quill_core::{compute_total, Money, Percent};
//!
//! let subtotal: Money = "200".parse().unwrap();
//! let total = compute_total(subtotal, Percent::from_whole(10), Percent::from_whole(5));
//!
//! assert_eq!(total.display_with("Rs."), "Rs.189.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use totals::{compute_total, Totals};
pub use types::*;
pub use validation::{validate_request, ValidationResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items on one invoice.
///
/// The invoice form offers exactly five item rows.
pub const MAX_LINE_ITEMS: usize = 5;

/// Currency label printed in front of every amount.
pub const DEFAULT_CURRENCY_MARKER: &str = "Rs.";
