use crate::models::Order;
use chrono::{DateTime, Utc};
use merx_catalog::OrderTotals;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Printable receipt for a completed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub order_id: Uuid,
    pub order_number: u64,
    pub reference: String,
    pub grand_total: f64,
    pub issued_at: DateTime<Utc>,
}

/// Issues and looks up receipts; one receipt per order
pub struct ReceiptService {
    receipts: HashMap<Uuid, Receipt>,
    by_order: HashMap<Uuid, Uuid>,
}

impl ReceiptService {
    pub fn new() -> Self {
        Self {
            receipts: HashMap::new(),
            by_order: HashMap::new(),
        }
    }

    /// Issue a receipt for an order using already-computed totals
    pub fn issue(&mut self, order: &Order, totals: &OrderTotals) -> Result<Receipt, ReceiptError> {
        if self.by_order.contains_key(&order.id) {
            return Err(ReceiptError::AlreadyIssued(order.id.to_string()));
        }

        let receipt = Receipt {
            id: Uuid::new_v4(),
            order_id: order.id,
            order_number: order.order_number,
            reference: Self::generate_reference(&order.id),
            grand_total: totals.grand_total,
            issued_at: Utc::now(),
        };

        self.by_order.insert(order.id, receipt.id);
        self.receipts.insert(receipt.id, receipt.clone());
        Ok(receipt)
    }

    pub fn get_receipt(&self, receipt_id: &Uuid) -> Option<&Receipt> {
        self.receipts.get(receipt_id)
    }

    pub fn get_by_reference(&self, reference: &str) -> Option<&Receipt> {
        self.receipts.values().find(|r| r.reference == reference)
    }

    pub fn get_for_order(&self, order_id: &Uuid) -> Option<&Receipt> {
        self.by_order
            .get(order_id)
            .and_then(|id| self.receipts.get(id))
    }

    /// Generate a unique receipt reference
    fn generate_reference(order_id: &Uuid) -> String {
        // Format: RCPT-{timestamp}-{short_uuid}
        let timestamp = Utc::now().timestamp();
        let short_id = &order_id.to_string()[..8];
        format!("RCPT-{}-{}", timestamp, short_id.to_uppercase())
    }

    /// Generate QR code data for the receipt (rendered by the UI layer)
    pub fn generate_qr_data(&self, receipt: &Receipt) -> String {
        serde_json::json!({
            "reference": receipt.reference,
            "order_id": receipt.order_id,
            "order_number": receipt.order_number,
            "grand_total": receipt.grand_total,
            "issued_at": receipt.issued_at,
        })
        .to_string()
    }
}

impl Default for ReceiptService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("Receipt already issued for order: {0}")]
    AlreadyIssued(String),

    #[error("Receipt not found: {0}")]
    NotFound(String),
}
