use crate::models::{Order, ShipmentStatus, TrackingInfo};
use crate::status::{RejectionReason, ShipmentStatusMachine, TransitionResult};
use crate::store::OrderStore;
use merx_shared::models::events::{OrderStatusChangedEvent, TrackingAttachedEvent};
use merx_shared::Masked;
use std::sync::Arc;
use uuid::Uuid;

/// Coordinates order lifecycle changes requested by the admin screens: every
/// status change runs through the status machine before it is persisted.
pub struct OrderManager {
    store: Arc<dyn OrderStore>,
    machine: ShipmentStatusMachine,
}

impl OrderManager {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            machine: ShipmentStatusMachine::new(),
        }
    }

    /// Store a newly placed order
    pub async fn place_order(&self, order: Order) -> Result<Uuid, OrderError> {
        let id = self.store.create_order(&order).await.map_err(OrderError::Store)?;
        tracing::info!(order_id = %id, order_number = order.order_number, "order placed");
        Ok(id)
    }

    pub async fn get_order(&self, order_id: Uuid) -> Result<Order, OrderError> {
        self.store
            .get_order(order_id)
            .await
            .map_err(OrderError::Store)?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    /// Apply a status change requested from the UI.
    ///
    /// Rejections surface as typed errors whose Display text is shown to the
    /// admin verbatim.
    pub async fn change_status(
        &self,
        order_id: Uuid,
        requested: ShipmentStatus,
    ) -> Result<OrderStatusChangedEvent, OrderError> {
        let order = self.get_order(order_id).await?;

        match self
            .machine
            .validate_transition(order.status, requested, order.has_tracking())
        {
            TransitionResult::Rejected(reason) => Err(OrderError::TransitionRejected(reason)),
            TransitionResult::Allowed => {
                self.store
                    .update_status(order_id, requested)
                    .await
                    .map_err(OrderError::Store)?;

                tracing::info!(
                    order_id = %order_id,
                    from = order.status.code(),
                    to = requested.code(),
                    "order status changed"
                );

                Ok(OrderStatusChangedEvent {
                    order_id,
                    previous_status: order.status.code().to_string(),
                    new_status: requested.code().to_string(),
                    timestamp: chrono::Utc::now().timestamp(),
                })
            }
        }
    }

    /// Attach carrier tracking to an order, once.
    pub async fn attach_tracking(
        &self,
        order_id: Uuid,
        tracking_number: impl Into<String>,
        carrier_code: impl Into<String>,
    ) -> Result<TrackingAttachedEvent, OrderError> {
        let tracking_number = tracking_number.into();
        let carrier_code = carrier_code.into();

        if tracking_number.is_empty() {
            return Err(OrderError::EmptyTrackingNumber);
        }

        let order = self.get_order(order_id).await?;

        if !self.machine.can_attach_tracking(order.status) {
            return Err(OrderError::TrackingNotAllowed(order.status));
        }
        if order.tracking.is_some() {
            return Err(OrderError::TrackingAlreadyAttached(order_id.to_string()));
        }

        let tracking = TrackingInfo::new(tracking_number.clone(), carrier_code.clone());
        self.store
            .set_tracking(order_id, tracking)
            .await
            .map_err(OrderError::Store)?;

        tracing::info!(order_id = %order_id, carrier = %carrier_code, "tracking attached");

        Ok(TrackingAttachedEvent {
            order_id,
            tracking_number: Masked::new(tracking_number),
            carrier_code,
            timestamp: chrono::Utc::now().timestamp(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    TransitionRejected(#[from] RejectionReason),

    #[error("Tracking cannot be added while order is {0}")]
    TrackingNotAllowed(ShipmentStatus),

    #[error("Tracking already attached to order {0}")]
    TrackingAlreadyAttached(String),

    #[error("Tracking number must not be empty")]
    EmptyTrackingNumber,

    #[error("Order store failure: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryOrderStore;

    async fn manager_with_order(status: ShipmentStatus) -> (OrderManager, Uuid) {
        let store = Arc::new(InMemoryOrderStore::new());
        let manager = OrderManager::new(store);

        let mut order = Order::new(1001, "CUST001", "customer@example.com");
        order.status = status;
        let id = manager.place_order(order).await.unwrap();
        (manager, id)
    }

    #[tokio::test]
    async fn test_status_change_blocked_without_tracking() {
        let (manager, id) = manager_with_order(ShipmentStatus::OrderPlaced).await;

        let err = manager
            .change_status(id, ShipmentStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::TransitionRejected(_)));
        assert_eq!(
            err.to_string(),
            "Cannot proceed: Please add a tracking number before changing status to Shipped"
        );

        // Order untouched
        let order = manager.get_order(id).await.unwrap();
        assert_eq!(order.status, ShipmentStatus::OrderPlaced);
    }

    #[tokio::test]
    async fn test_tracking_then_status_change() {
        let (manager, id) = manager_with_order(ShipmentStatus::Packing).await;

        let event = manager.attach_tracking(id, "JT-778899", "JT").await.unwrap();
        assert_eq!(event.carrier_code, "JT");

        let event = manager.change_status(id, ShipmentStatus::Shipped).await.unwrap();
        assert_eq!(event.previous_status, "PACKING");
        assert_eq!(event.new_status, "SHIPPED");

        let order = manager.get_order(id).await.unwrap();
        assert_eq!(order.status, ShipmentStatus::Shipped);
        assert!(order.has_tracking());
    }

    #[tokio::test]
    async fn test_tracking_gated_by_status() {
        let (manager, id) = manager_with_order(ShipmentStatus::OrderPlaced).await;

        let err = manager.attach_tracking(id, "JT-778899", "JT").await.unwrap_err();
        assert!(matches!(err, OrderError::TrackingNotAllowed(ShipmentStatus::OrderPlaced)));
    }

    #[tokio::test]
    async fn test_tracking_attached_once() {
        let (manager, id) = manager_with_order(ShipmentStatus::Packing).await;

        manager.attach_tracking(id, "JT-778899", "JT").await.unwrap();
        let err = manager.attach_tracking(id, "JT-000000", "JT").await.unwrap_err();
        assert!(matches!(err, OrderError::TrackingAlreadyAttached(_)));
    }

    #[tokio::test]
    async fn test_empty_tracking_number_rejected() {
        let (manager, id) = manager_with_order(ShipmentStatus::Packing).await;

        let err = manager.attach_tracking(id, "", "JT").await.unwrap_err();
        assert!(matches!(err, OrderError::EmptyTrackingNumber));
    }

    #[tokio::test]
    async fn test_ungated_status_change() {
        let (manager, id) = manager_with_order(ShipmentStatus::OrderPlaced).await;

        manager.change_status(id, ShipmentStatus::Packing).await.unwrap();
        manager
            .change_status(id, ShipmentStatus::ProblemDelayed)
            .await
            .unwrap();

        let order = manager.get_order(id).await.unwrap();
        assert_eq!(order.status, ShipmentStatus::ProblemDelayed);
    }
}
