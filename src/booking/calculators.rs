//! Core booking price calculations.
//!
//! Pure functions for pricing math - no storage, no clock, no configuration
//! lookups. Callers enforce the input constraints (positive hourly rate,
//! duration of at least one hour, tax rate in `[0, 1]`).

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::responses::MoneyResponse;

/// Smallest bookable duration in hours.
pub const MIN_DURATION_HOURS: u32 = 1;

/// Round to whole currency units, half-up.
///
/// Totals are never negative, so rounding midpoints away from zero is the same
/// as rounding them up.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use driftly_web::booking::round_money;
///
/// assert_eq!(round_money(dec!(2.5)), dec!(3));
/// assert_eq!(round_money(dec!(2646.0)), dec!(2646));
/// assert_eq!(round_money(dec!(10.49)), dec!(10));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Itemized price of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub add_on_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
}

impl PriceBreakdown {
    /// Subtotal the tax is levied on
    pub fn taxable(&self) -> Decimal {
        self.base_total + self.add_on_total
    }

    /// Render every line as money in the given currency
    pub fn to_money(&self, currency: &str) -> PriceBreakdownResponse {
        let money = |amount: Decimal| MoneyResponse {
            amount,
            currency: currency.to_string(),
        };
        PriceBreakdownResponse {
            base_total: money(self.base_total),
            add_on_total: money(self.add_on_total),
            tax: money(self.tax),
            grand_total: money(self.grand_total),
        }
    }
}

/// Itemized price with a currency on every line
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdownResponse {
    pub base_total: MoneyResponse,
    pub add_on_total: MoneyResponse,
    pub tax: MoneyResponse,
    pub grand_total: MoneyResponse,
}

/// Compute the itemized and total price of a booking.
///
/// `base_total = price_per_hour * duration_hours`, the add-on is a flat cost,
/// and tax is levied on their sum and rounded half-up to whole units.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use driftly_web::booking::compute_totals;
///
/// let totals = compute_totals(dec!(2500), 2, false, dec!(1200), dec!(0.18));
/// assert_eq!(totals.base_total, dec!(5000));
/// assert_eq!(totals.tax, dec!(900));
/// assert_eq!(totals.grand_total, dec!(5900));
/// ```
pub fn compute_totals(
    price_per_hour: Decimal,
    duration_hours: u32,
    include_add_on: bool,
    add_on_cost: Decimal,
    tax_rate: Decimal,
) -> PriceBreakdown {
    let base_total = price_per_hour * Decimal::from(duration_hours);
    let add_on_total = if include_add_on {
        add_on_cost
    } else {
        Decimal::ZERO
    };
    let tax = round_money(tax_rate * (base_total + add_on_total));

    PriceBreakdown {
        base_total,
        add_on_total,
        tax,
        grand_total: base_total + add_on_total + tax,
    }
}

/// Apply a delta to a duration, never going below one hour.
pub fn adjust_duration(current: u32, delta: i32) -> u32 {
    let adjusted = i64::from(current) + i64::from(delta);
    adjusted.clamp(i64::from(MIN_DURATION_HOURS), i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(2.5)), dec!(3));
        assert_eq!(round_money(dec!(3.5)), dec!(4));
        assert_eq!(round_money(dec!(4.5)), dec!(5));
    }

    #[test]
    fn test_round_money_non_midpoint() {
        assert_eq!(round_money(dec!(10.49)), dec!(10));
        assert_eq!(round_money(dec!(10.51)), dec!(11));
        assert_eq!(round_money(dec!(0)), dec!(0));
    }

    // ==================== compute_totals tests ====================

    #[test]
    fn test_compute_totals_without_add_on() {
        let totals = compute_totals(dec!(2500), 2, false, dec!(1200), dec!(0.18));
        assert_eq!(totals.base_total, dec!(5000));
        assert_eq!(totals.add_on_total, dec!(0));
        assert_eq!(totals.tax, dec!(900));
        assert_eq!(totals.grand_total, dec!(5900));
    }

    #[test]
    fn test_compute_totals_with_add_on() {
        let totals = compute_totals(dec!(4500), 3, true, dec!(1200), dec!(0.18));
        assert_eq!(totals.base_total, dec!(13500));
        assert_eq!(totals.add_on_total, dec!(1200));
        assert_eq!(totals.taxable(), dec!(14700));
        assert_eq!(totals.tax, dec!(2646));
        assert_eq!(totals.grand_total, dec!(17346));
    }

    #[test]
    fn test_compute_totals_tax_midpoint_rounds_up() {
        // 0.5 * 5 = 2.5
        let totals = compute_totals(dec!(5), 1, false, dec!(0), dec!(0.5));
        assert_eq!(totals.tax, dec!(3));
        assert_eq!(totals.grand_total, dec!(8));
    }

    #[test]
    fn test_compute_totals_zero_tax_rate() {
        let totals = compute_totals(dec!(1800), 4, true, dec!(1200), dec!(0));
        assert_eq!(totals.tax, dec!(0));
        assert_eq!(totals.grand_total, dec!(8400));
    }

    #[test]
    fn test_compute_totals_base_is_exact_product() {
        for price in [dec!(1), dec!(1500), dec!(1800), dec!(8000), dec!(12345)] {
            for hours in 1..=12u32 {
                let totals = compute_totals(price, hours, false, dec!(1200), dec!(0.18));
                assert_eq!(totals.base_total, price * Decimal::from(hours));
                assert_eq!(
                    totals.grand_total,
                    totals.base_total + totals.add_on_total + totals.tax
                );
            }
        }
    }

    #[test]
    fn test_compute_totals_is_deterministic() {
        let a = compute_totals(dec!(8000), 5, true, dec!(1200), dec!(0.18));
        let b = compute_totals(dec!(8000), 5, true, dec!(1200), dec!(0.18));
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_money_carries_currency() {
        let money = compute_totals(dec!(2500), 2, false, dec!(1200), dec!(0.18)).to_money("INR");
        assert_eq!(money.grand_total.amount, dec!(5900));
        assert_eq!(money.grand_total.currency, "INR");
        assert_eq!(money.tax.currency, "INR");
    }

    // ==================== adjust_duration tests ====================

    #[test]
    fn test_adjust_duration_clamps_at_one() {
        assert_eq!(adjust_duration(1, -5), 1);
        assert_eq!(adjust_duration(2, -1), 1);
        assert_eq!(adjust_duration(3, i32::MIN), 1);
    }

    #[test]
    fn test_adjust_duration_increments() {
        assert_eq!(adjust_duration(2, 1), 3);
        assert_eq!(adjust_duration(1, 0), 1);
        assert_eq!(adjust_duration(u32::MAX, 1), u32::MAX);
    }
}
