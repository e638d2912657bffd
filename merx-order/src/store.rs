use crate::models::{Order, ShipmentStatus, TrackingInfo};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Repository trait for order data access.
///
/// Production deployments back this with their own persistence; the domain
/// layer only validates inputs/outputs around these calls.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: &Order) -> StoreResult<Uuid>;

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>>;

    async fn update_status(&self, id: Uuid, status: ShipmentStatus) -> StoreResult<()>;

    async fn set_tracking(&self, id: Uuid, tracking: TrackingInfo) -> StoreResult<()>;

    async fn list_orders(&self, customer_id: &str) -> StoreResult<Vec<Order>>;
}

/// Reference in-memory store, also used by tests
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Order not found: {0}")]
struct MissingOrder(Uuid);

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(&self, order: &Order) -> StoreResult<Uuid> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        Ok(order.id)
    }

    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn update_status(&self, id: Uuid, status: ShipmentStatus) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(MissingOrder(id))?;
        order.status = status;
        order.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn set_tracking(&self, id: Uuid, tracking: TrackingInfo) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(MissingOrder(id))?;
        order.tracking = Some(tracking);
        order.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn list_orders(&self, customer_id: &str) -> StoreResult<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }
}
