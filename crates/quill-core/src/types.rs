//! # Domain Types
//!
//! Core domain types used throughout Quill Invoice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────────┐      ┌─────────────────┐                   │
//! │  │    InvoiceRequest       │      │    LineItem     │                   │
//! │  │  ─────────────────────  │ 1..5 │  ─────────────  │                   │
//! │  │  company_name           │─────►│  name           │                   │
//! │  │  billed_to              │      │  quantity       │                   │
//! │  │  invoice_number         │      │  unit_price     │                   │
//! │  │  date                   │      └─────────────────┘                   │
//! │  │  discount_percent ──┐   │                                            │
//! │  │  tax_percent ───────┤   │      ┌─────────────────┐                   │
//! │  └─────────────────────┼───┘      │    Percent      │                   │
//! │                        └─────────►│  bps (u32)      │                   │
//! │                                   │  1250 = 12.5%   │                   │
//! │                                   └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here outlives a single generate call: a request is built, checked,
//! rendered and dropped.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::{parse_hundredths, DecimalInput, Money};
use crate::totals::Totals;

// =============================================================================
// Percent
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1250 bps = 12.5%. The form steps discount and tax in 0.1% increments,
/// so two decimal places is more than enough and keeps the math integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(u32);

impl Percent {
    /// Basis points in 100%.
    pub const HUNDRED_BPS: u32 = 10_000;

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from whole percent.
    #[inline]
    pub const fn from_whole(pct: u32) -> Self {
        Percent(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// One hundred percent.
    #[inline]
    pub const fn hundred() -> Self {
        Percent(Self::HUNDRED_BPS)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Shortest decimal form: `10`, `12.5`, `8.25`, `0`. No `%` sign.
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        match fraction {
            0 => write!(f, "{}", whole),
            f10 if f10 % 10 == 0 => write!(f, "{}.{}", whole, f10 / 10),
            _ => write!(f, "{}.{:02}", whole, fraction),
        }
    }
}

impl FromStr for Percent {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CoreError::InvalidPercent {
            input: s.to_string(),
            reason,
        };

        let scaled = parse_hundredths(s.trim().trim_end_matches('%')).map_err(invalid)?;
        if scaled < 0 {
            return Err(invalid("must not be negative".to_string()));
        }
        u32::try_from(scaled)
            .map(Percent)
            .map_err(|_| invalid("value is too large".to_string()))
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = DecimalInput::deserialize(deserializer)?.into_text();
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One purchasable entry on an invoice.
///
/// `unit_price` also accepts the key `price`, which is what the invoice form
/// calls it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description shown in the first table column.
    pub name: String,

    /// Number of units.
    pub quantity: u32,

    /// Price of one unit.
    #[serde(alias = "price")]
    pub unit_price: Money,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether the row would be kept by the invoice form: a name, a positive
    /// quantity and a positive price.
    pub fn is_billable(&self) -> bool {
        !self.name.trim().is_empty() && self.quantity > 0 && self.unit_price.is_positive()
    }
}

// =============================================================================
// Invoice Request
// =============================================================================

/// Everything needed to render one invoice.
///
/// ## Lifetime
/// ```text
/// JSON file ──► InvoiceRequest ──► validate ──► PDF bytes
///                    │                              │
///                    └────────── dropped ◄──────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// Issuing company, rendered as the document title.
    pub company_name: String,

    /// Customer the invoice is addressed to.
    pub billed_to: String,

    /// Free-form invoice number ("INV-001").
    pub invoice_number: String,

    /// Invoice date, rendered as `YYYY-MM-DD`.
    pub date: NaiveDate,

    /// Ordered line items.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Discount applied to the subtotal before tax.
    #[serde(default)]
    pub discount_percent: Percent,

    /// Tax applied to the discounted amount.
    #[serde(default)]
    pub tax_percent: Percent,
}

impl InvoiceRequest {
    /// Sum of all line totals, before discount and tax.
    pub fn subtotal(&self) -> Money {
        crate::totals::subtotal(&self.items)
    }

    /// Full discount/tax breakdown for this request.
    pub fn totals(&self) -> Totals {
        Totals::compute(self.subtotal(), self.discount_percent, self.tax_percent)
    }

    /// Drops the rows the invoice form would have ignored (blank name,
    /// zero quantity or zero price).
    pub fn without_blank_items(mut self) -> Self {
        self.items = crate::validation::billable_items(self.items);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
