use chrono::{DateTime, Utc};
use merx_catalog::{LineItemPricingInput, OrderTotals, PricingEngine};
use merx_shared::Masked;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Shipment status in the order lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    OrderPlaced,
    Packing,
    ReadyForPickup,
    Shipped,
    OutForDelivery,
    Delivered,
    ProblemDelayed,
    Canceled,
}

impl ShipmentStatus {
    /// Wire code matching the serde representation
    pub fn code(&self) -> &'static str {
        match self {
            ShipmentStatus::OrderPlaced => "ORDER_PLACED",
            ShipmentStatus::Packing => "PACKING",
            ShipmentStatus::ReadyForPickup => "READY_FOR_PICKUP",
            ShipmentStatus::Shipped => "SHIPPED",
            ShipmentStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            ShipmentStatus::Delivered => "DELIVERED",
            ShipmentStatus::ProblemDelayed => "PROBLEM_DELAYED",
            ShipmentStatus::Canceled => "CANCELED",
        }
    }

    /// Label used in admin-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::OrderPlaced => "Order Placed",
            ShipmentStatus::Packing => "Packing",
            ShipmentStatus::ReadyForPickup => "Ready for Pickup",
            ShipmentStatus::Shipped => "Shipped",
            ShipmentStatus::OutForDelivery => "Out for Delivery",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::ProblemDelayed => "Problem / Delayed",
            ShipmentStatus::Canceled => "Canceled",
        }
    }

    /// No further transitions are modeled past these states. Informational:
    /// the transition gate itself stays permissive.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Canceled)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Carrier tracking attached to an order. Created once; the carrier/number
/// pair is immutable afterward (no update path).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingInfo {
    pub tracking_number: String,
    pub carrier_code: String,
    pub created_at: DateTime<Utc>,
}

impl TrackingInfo {
    pub fn new(tracking_number: impl Into<String>, carrier_code: impl Into<String>) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            carrier_code: carrier_code.into(),
            created_at: Utc::now(),
        }
    }
}

/// An individual product within an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    /// Variation/option names chosen at purchase time, display only
    pub selected_options: Vec<String>,
    pub pricing: LineItemPricingInput,
}

impl OrderLine {
    pub fn new(product_id: Uuid, name: impl Into<String>, pricing: LineItemPricingInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            name: name.into(),
            selected_options: Vec::new(),
            pricing,
        }
    }
}

/// The single source of truth for a customer's purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: u64,
    pub customer_id: String,
    pub customer_email: Masked<String>,
    pub lines: Vec<OrderLine>,
    pub shipping_fee: f64,
    pub voucher_amount: f64,
    pub status: ShipmentStatus,
    pub tracking: Option<TrackingInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(order_number: u64, customer_id: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_number,
            customer_id: customer_id.into(),
            customer_email: Masked::new(email.into()),
            lines: Vec::new(),
            shipping_fee: 0.0,
            voucher_amount: 0.0,
            status: ShipmentStatus::OrderPlaced,
            tracking: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a line to the order
    pub fn add_line(&mut self, line: OrderLine) {
        self.lines.push(line);
        self.updated_at = Utc::now();
    }

    /// A tracking number counts only when non-empty
    pub fn has_tracking(&self) -> bool {
        self.tracking
            .as_ref()
            .map(|t| !t.tracking_number.is_empty())
            .unwrap_or(false)
    }

    /// Derive display totals fresh from the lines; nothing is cached on the
    /// record.
    pub fn totals(&self, engine: &PricingEngine) -> OrderTotals {
        let line_results: Vec<_> = self
            .lines
            .iter()
            .map(|line| engine.compute_line_item(&line.pricing))
            .collect();

        engine.compute_order_totals(&line_results, self.shipping_fee, self.voucher_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merx_catalog::MoneyAdjustment;

    fn line(capital: f64, quantity: u32) -> OrderLine {
        OrderLine::new(
            Uuid::new_v4(),
            "Widget",
            LineItemPricingInput {
                capital,
                additional_capital: MoneyAdjustment::fixed(0.0),
                vat_percent: 0.0,
                discount_percent: 0.0,
                variation_adjustment: 0.0,
                quantity,
            },
        )
    }

    #[test]
    fn test_new_order_starts_placed_without_tracking() {
        let order = Order::new(1001, "CUST001", "customer@example.com");
        assert_eq!(order.status, ShipmentStatus::OrderPlaced);
        assert!(!order.has_tracking());
        assert!(order.lines.is_empty());
    }

    #[test]
    fn test_empty_tracking_number_does_not_count() {
        let mut order = Order::new(1001, "CUST001", "customer@example.com");
        order.tracking = Some(TrackingInfo::new("", "JT"));
        assert!(!order.has_tracking());

        order.tracking = Some(TrackingInfo::new("JT-778899", "JT"));
        assert!(order.has_tracking());
    }

    #[test]
    fn test_totals_derived_from_lines() {
        let engine = PricingEngine::new();
        let mut order = Order::new(1002, "CUST002", "customer@example.com");
        order.add_line(line(100.0, 2));
        order.add_line(line(25.0, 1));
        order.shipping_fee = 10.0;
        order.voucher_amount = 35.0;

        let totals = order.totals(&engine);
        assert_eq!(totals.subtotal, 225.0);
        assert_eq!(totals.grand_total, 200.0);
    }

    #[test]
    fn test_customer_email_masked_in_debug() {
        let order = Order::new(1003, "CUST003", "customer@example.com");
        let dump = format!("{:?}", order);
        assert!(!dump.contains("customer@example.com"));
    }

    #[test]
    fn test_status_codes_round_trip() {
        for status in [
            ShipmentStatus::OrderPlaced,
            ShipmentStatus::ReadyForPickup,
            ShipmentStatus::ProblemDelayed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
            let back: ShipmentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }
}
