use crate::product::MoneyAdjustment;
use merx_shared::money::round2;
use serde::{Deserialize, Serialize};

/// Everything needed to price one order line, derived fresh from the
/// Product/Order record on each computation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricingInput {
    /// Base cost, expected `>= 0` (not enforced here)
    pub capital: f64,
    /// Markup over capital
    pub additional_capital: MoneyAdjustment,
    /// Expected `0..=100` (not enforced here)
    pub vat_percent: f64,
    /// Expected `0..=100` (not enforced here)
    pub discount_percent: f64,
    /// Signed currency delta from the selected option(s)
    pub variation_adjustment: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricingResult {
    pub unit_price_before_discount: f64,
    pub unit_discount_amount: f64,
    pub unit_final_price: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub voucher_amount: f64,
    pub grand_total: f64,
}

/// Stateless price computation shared by every admin screen.
///
/// One canonical order of operations: round the discount step, then add the
/// variation adjustment, then round again for the line total. Screens must
/// call this instead of re-deriving the formula.
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute a line item's unit price and line total.
    ///
    /// Pure arithmetic transform: out-of-range inputs are a caller validation
    /// responsibility and are not rejected here, and a large negative
    /// variation adjustment can yield a negative price.
    pub fn compute_line_item(&self, input: &LineItemPricingInput) -> LineItemPricingResult {
        let markup = input.additional_capital.amount_over(input.capital);
        let base_with_markup = input.capital + markup;
        let unit_before_discount = base_with_markup * (1.0 + input.vat_percent / 100.0);
        let unit_discount = unit_before_discount * input.discount_percent / 100.0;

        let unit_final_price =
            round2(unit_before_discount - unit_discount) + input.variation_adjustment;
        let line_total = round2(unit_final_price * input.quantity as f64);

        LineItemPricingResult {
            // Reported amounts are rounded where they are produced; the
            // chained math above uses the unrounded values.
            unit_price_before_discount: round2(unit_before_discount),
            unit_discount_amount: round2(unit_discount),
            unit_final_price,
            line_total,
        }
    }

    /// Aggregate line totals into order totals. The grand total is clamped to
    /// zero; negative shipping/voucher values are accepted numerically.
    pub fn compute_order_totals(
        &self,
        line_items: &[LineItemPricingResult],
        shipping_fee: f64,
        voucher_amount: f64,
    ) -> OrderTotals {
        let subtotal = round2(line_items.iter().map(|item| item.line_total).sum());
        let grand_total = round2(subtotal + shipping_fee - voucher_amount).max(0.0);

        OrderTotals {
            subtotal,
            shipping_fee,
            voucher_amount,
            grand_total,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}
