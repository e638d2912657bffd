use crate::models::{Order, ShipmentStatus};
use chrono::{Datelike, NaiveDate};
use merx_catalog::PricingEngine;
use merx_shared::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time bucketing for sales rollups
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeBucket {
    Daily,
    Monthly,
}

/// One row of the sales report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesBucket {
    pub period_start: NaiveDate,
    pub order_count: u64,
    pub units_sold: u64,
    pub gross_sales: f64,
    pub capital_cost: f64,
    pub vat_amount: f64,
    pub discount_amount: f64,
    pub profit: f64,
}

/// Client-side rollups of sales, capital, VAT and profit across time buckets,
/// computed over already-fetched orders
pub struct SalesAnalytics {
    engine: PricingEngine,
}

impl SalesAnalytics {
    pub fn new() -> Self {
        Self {
            engine: PricingEngine::new(),
        }
    }

    /// Summarize orders into time buckets keyed by creation date (UTC).
    ///
    /// Canceled orders are excluded. Per line: gross is the line total,
    /// capital is the base cost times quantity, VAT is taken over
    /// capital-plus-markup, and profit is gross minus capital minus VAT.
    pub fn summarize(&self, orders: &[Order], bucket: TimeBucket) -> Vec<SalesBucket> {
        let mut buckets: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();

        for order in orders {
            if order.status == ShipmentStatus::Canceled {
                continue;
            }

            let period_start = Self::period_start(order.created_at.date_naive(), bucket);
            let acc = buckets.entry(period_start).or_default();
            acc.order_count += 1;

            for line in &order.lines {
                let pricing = &line.pricing;
                let quantity = pricing.quantity as f64;

                let markup = pricing.additional_capital.amount_over(pricing.capital);
                let base_with_markup = pricing.capital + markup;
                let result = self.engine.compute_line_item(pricing);

                acc.units_sold += pricing.quantity as u64;
                acc.gross_sales += result.line_total;
                acc.capital_cost += pricing.capital * quantity;
                acc.vat_amount += base_with_markup * pricing.vat_percent / 100.0 * quantity;
                acc.discount_amount += result.unit_discount_amount * quantity;
            }
        }

        buckets
            .into_iter()
            .map(|(period_start, acc)| acc.into_bucket(period_start))
            .collect()
    }

    fn period_start(date: NaiveDate, bucket: TimeBucket) -> NaiveDate {
        match bucket {
            TimeBucket::Daily => date,
            TimeBucket::Monthly => date.with_day(1).unwrap_or(date),
        }
    }
}

impl Default for SalesAnalytics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct Accumulator {
    order_count: u64,
    units_sold: u64,
    gross_sales: f64,
    capital_cost: f64,
    vat_amount: f64,
    discount_amount: f64,
}

impl Accumulator {
    fn into_bucket(self, period_start: NaiveDate) -> SalesBucket {
        let gross_sales = round2(self.gross_sales);
        let capital_cost = round2(self.capital_cost);
        let vat_amount = round2(self.vat_amount);

        SalesBucket {
            period_start,
            order_count: self.order_count,
            units_sold: self.units_sold,
            gross_sales,
            capital_cost,
            vat_amount,
            discount_amount: round2(self.discount_amount),
            profit: round2(gross_sales - capital_cost - vat_amount),
        }
    }
}
