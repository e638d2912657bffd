pub mod analytics;
pub mod manager;
pub mod models;
pub mod receipts;
pub mod status;
pub mod store;

pub use analytics::{SalesAnalytics, SalesBucket, TimeBucket};
pub use manager::{OrderError, OrderManager};
pub use models::{Order, OrderLine, ShipmentStatus, TrackingInfo};
pub use receipts::{Receipt, ReceiptService};
pub use status::{CourierState, RejectionReason, ShipmentStatusMachine, TransitionResult};
pub use store::{InMemoryOrderStore, OrderStore};
