use crate::pii::Masked;
use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct OrderStatusChangedEvent {
    pub order_id: Uuid,
    pub previous_status: String,
    pub new_status: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct TrackingAttachedEvent {
    pub order_id: Uuid,
    pub tracking_number: Masked<String>,
    pub carrier_code: String,
    pub timestamp: i64,
}
