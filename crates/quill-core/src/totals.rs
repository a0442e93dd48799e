//! # Totals
//!
//! Discount and tax arithmetic for an invoice.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   discounted = subtotal × (1 − discount / 100)                          │
//! │   total      = discounted × (1 + tax / 100)                             │
//! │                                                                         │
//! │   In basis points (d, t) and minor units (s):                           │
//! │                                                                         │
//! │   total = s × (10000 − d) × (10000 + t) / 10000²                        │
//! │                                                                         │
//! │   Evaluated exactly in i128, then rounded ONCE, half to even.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding only at the end means the printed total never drifts by a cent
//! from the formula, whatever the percentages are.
//!
//! ## Example
//! ```rust
//! use quill_core::money::Money;
//! use quill_core::totals::compute_total;
//! use quill_core::types::Percent;
//!
//! let total = compute_total(
//!     Money::from_cents(20000),
//!     Percent::from_whole(10),
//!     Percent::from_whole(5),
//! );
//! assert_eq!(total.to_string(), "189.00");
//! ```

use serde::{Deserialize, Serialize};

use crate::money::{div_round_half_even, Money};
use crate::types::{LineItem, Percent};

const HUNDRED_BPS: i128 = Percent::HUNDRED_BPS as i128;

/// Sum of `quantity × unit_price` across all items.
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

/// Applies a percentage discount and then a percentage tax to `subtotal`.
///
/// Percentages are not range-checked here. A discount above 100% gives a
/// negative result, which is the arithmetic answer. The boundary validator
/// keeps both in [0, 100] for real invoices.
pub fn compute_total(subtotal: Money, discount_percent: Percent, tax_percent: Percent) -> Money {
    let discount_factor = HUNDRED_BPS - discount_percent.bps() as i128;
    let tax_factor = HUNDRED_BPS + tax_percent.bps() as i128;

    let total = (subtotal.cents() as i128)
        .checked_mul(discount_factor)
        .and_then(|scaled| scaled.checked_mul(tax_factor))
        .map(|numerator| div_round_half_even(numerator, HUNDRED_BPS * HUNDRED_BPS))
        .unwrap_or_else(|| saturated_sign(subtotal, discount_factor * tax_factor));

    Money::from_cents(clamp_to_i64(total))
}

/// Subtotal after the discount only, rounded half to even.
pub fn discounted_amount(subtotal: Money, discount_percent: Percent) -> Money {
    let discount_factor = HUNDRED_BPS - discount_percent.bps() as i128;
    let discounted = div_round_half_even(subtotal.cents() as i128 * discount_factor, HUNDRED_BPS);
    Money::from_cents(clamp_to_i64(discounted))
}

/// Narrows an exact result to `i64`, saturating at its bounds.
///
/// Only unvalidated inputs (percentages far above 100%) reach the bounds.
fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Stand-in for a product too large for i128, carrying only its sign.
fn saturated_sign(subtotal: Money, factor: i128) -> i128 {
    if (subtotal.cents() < 0) != (factor < 0) {
        i128::MIN
    } else {
        i128::MAX
    }
}

// =============================================================================
// Totals Breakdown
// =============================================================================

/// Every figure shown in an invoice's summary.
///
/// ## Invariants
/// - `total == compute_total(subtotal, discount_percent, tax_percent)`
/// - `subtotal - discount_amount == taxable_amount`
/// - `taxable_amount + tax_amount == total`
///
/// The two derived amounts absorb the rounding so the lines always add up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub discount_percent: Percent,
    pub tax_percent: Percent,
    pub discount_amount: Money,
    pub taxable_amount: Money,
    pub tax_amount: Money,
    pub total: Money,
}

impl Totals {
    /// Computes the breakdown for a subtotal.
    pub fn compute(subtotal: Money, discount_percent: Percent, tax_percent: Percent) -> Self {
        let taxable_amount = discounted_amount(subtotal, discount_percent);
        let total = compute_total(subtotal, discount_percent, tax_percent);

        Totals {
            subtotal,
            discount_percent,
            tax_percent,
            discount_amount: subtotal - taxable_amount,
            taxable_amount,
            tax_amount: total - taxable_amount,
            total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn money(text: &str) -> Money {
        text.parse().unwrap()
    }

    fn pct(text: &str) -> Percent {
        text.parse().unwrap()
    }

    #[test]
    fn test_no_discount_no_tax() {
        assert_eq!(compute_total(money("100"), pct("0"), pct("0")), money("100.00"));
    }

    #[test]
    fn test_discount_then_tax() {
        // 200 × 0.90 = 180; 180 × 1.05 = 189
        assert_eq!(compute_total(money("200"), pct("10"), pct("5")), money("189.00"));
    }

    #[test]
    fn test_zero_subtotal() {
        assert_eq!(compute_total(Money::zero(), pct("50"), pct("20")), Money::zero());
    }

    #[test]
    fn test_full_discount() {
        assert_eq!(compute_total(money("57.31"), pct("100"), pct("18")), Money::zero());
    }

    #[test]
    fn test_discount_over_hundred_goes_negative() {
        assert_eq!(compute_total(money("100"), pct("150"), pct("0")), money("-50.00"));
    }

    #[test]
    fn test_rounds_half_to_even_once() {
        // 0.25 × 1.10 = 0.275 → 0.28 (7 is odd, rounds up to even 8)
        assert_eq!(compute_total(money("0.25"), pct("0"), pct("10")), money("0.28"));
        // 0.05 × 1.50 = 0.075 → 0.08
        assert_eq!(compute_total(money("0.05"), pct("0"), pct("50")), money("0.08"));
        // 0.15 × 1.50 = 0.225 → 0.22 (2 is already even)
        assert_eq!(compute_total(money("0.15"), pct("0"), pct("50")), money("0.22"));
    }

    #[test]
    fn test_single_rounding_differs_from_stepwise() {
        // Stepwise: 0.15 × 0.5 = 0.075 → 0.08, then × 1.5 = 0.12
        // Exact:    0.15 × 0.5 × 1.5 = 0.1125 → 0.11
        assert_eq!(compute_total(money("0.15"), pct("50"), pct("50")), money("0.11"));
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        let most = Money::from_cents(i64::MAX);
        let huge = Percent::from_bps(u32::MAX);

        assert_eq!(compute_total(most, pct("0"), huge), most);
        assert_eq!(compute_total(most, huge, pct("0")), Money::from_cents(i64::MIN));
        assert_eq!(compute_total(most, huge, huge), Money::from_cents(i64::MIN));
    }

    #[test]
    fn test_subtotal_of_items() {
        let items = vec![
            LineItem::new("Widget", 2, money("9.99")),
            LineItem::new("Gadget", 1, money("5.00")),
        ];
        assert_eq!(subtotal(&items), money("24.98"));
        assert_eq!(subtotal(&[]), Money::zero());
    }

    #[test]
    fn test_totals_breakdown_adds_up() {
        let totals = Totals::compute(money("24.98"), pct("12.5"), pct("18"));

        assert_eq!(totals.total, compute_total(money("24.98"), pct("12.5"), pct("18")));
        assert_eq!(totals.subtotal - totals.discount_amount, totals.taxable_amount);
        assert_eq!(totals.taxable_amount + totals.tax_amount, totals.total);
        // 24.98 × 0.875 = 21.8575 → 21.86
        assert_eq!(totals.taxable_amount, money("21.86"));
    }

    proptest! {
        #[test]
        fn prop_total_non_increasing_in_discount(
            cents in 0i64..10_000_000_000,
            d1 in 0u32..=10_000,
            d2 in 0u32..=10_000,
            tax in 0u32..=10_000,
        ) {
            let (low, high) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            let subtotal = Money::from_cents(cents);
            let tax = Percent::from_bps(tax);
            prop_assert!(
                compute_total(subtotal, Percent::from_bps(high), tax)
                    <= compute_total(subtotal, Percent::from_bps(low), tax)
            );
        }

        #[test]
        fn prop_total_non_decreasing_in_tax(
            cents in 0i64..10_000_000_000,
            discount in 0u32..=10_000,
            t1 in 0u32..=10_000,
            t2 in 0u32..=10_000,
        ) {
            let (low, high) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            let subtotal = Money::from_cents(cents);
            let discount = Percent::from_bps(discount);
            prop_assert!(
                compute_total(subtotal, discount, Percent::from_bps(high))
                    >= compute_total(subtotal, discount, Percent::from_bps(low))
            );
        }

        #[test]
        fn prop_zero_subtotal_is_zero(discount in 0u32..=10_000, tax in 0u32..=10_000) {
            prop_assert_eq!(
                compute_total(Money::zero(), Percent::from_bps(discount), Percent::from_bps(tax)),
                Money::zero()
            );
        }

        #[test]
        fn prop_breakdown_invariants(
            cents in 0i64..10_000_000_000,
            discount in 0u32..=10_000,
            tax in 0u32..=10_000,
        ) {
            let totals = Totals::compute(
                Money::from_cents(cents),
                Percent::from_bps(discount),
                Percent::from_bps(tax),
            );
            prop_assert_eq!(totals.subtotal - totals.discount_amount, totals.taxable_amount);
            prop_assert_eq!(totals.taxable_amount + totals.tax_amount, totals.total);
            prop_assert!(totals.total >= Money::zero());
        }
    }
}
