use crate::models::ShipmentStatus;
use serde::{Deserialize, Serialize};

/// Outcome of a status-change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    Allowed,
    Rejected(RejectionReason),
}

/// Typed rejection the caller renders as a user-facing message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("Cannot proceed: Please add a tracking number before changing status to {0}")]
    MissingTrackingNumber(ShipmentStatus),
}

/// Classification of a free-text courier status string
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourierState {
    pub is_delivered: bool,
    pub is_exception: bool,
}

/// Governs legal order status transitions. Pure decision logic: no network
/// calls, never panics.
pub struct ShipmentStatusMachine;

impl ShipmentStatusMachine {
    pub fn new() -> Self {
        Self
    }

    /// Statuses that may not be entered without a tracking number
    fn requires_tracking(requested: ShipmentStatus) -> bool {
        matches!(
            requested,
            ShipmentStatus::ReadyForPickup
                | ShipmentStatus::Shipped
                | ShipmentStatus::OutForDelivery
        )
    }

    /// Validate a requested status change.
    ///
    /// The only gate is the tracking-number precondition; beyond it any
    /// status is reachable from any other. That permissiveness is
    /// intentional: the admin screens select statuses freely and the gate is
    /// the single invariant the workflow enforces.
    pub fn validate_transition(
        &self,
        _current: ShipmentStatus,
        requested: ShipmentStatus,
        has_tracking_number: bool,
    ) -> TransitionResult {
        if Self::requires_tracking(requested) && !has_tracking_number {
            return TransitionResult::Rejected(RejectionReason::MissingTrackingNumber(requested));
        }

        TransitionResult::Allowed
    }

    /// Whether the "Add Tracking" action is offered for an order in `status`.
    /// Independent of the transition gate above.
    pub fn can_attach_tracking(&self, status: ShipmentStatus) -> bool {
        matches!(
            status,
            ShipmentStatus::Packing | ShipmentStatus::Shipped | ShipmentStatus::OutForDelivery
        )
    }

    /// Map a courier-provided status string onto lifecycle flags.
    ///
    /// Presentation classifier only: case-sensitive substring match, does not
    /// mutate the order's shipment status.
    pub fn classify_courier_state(&self, courier_status: &str) -> CourierState {
        CourierState {
            is_delivered: courier_status.contains("delivered"),
            is_exception: courier_status.contains("exception"),
        }
    }
}

impl Default for ShipmentStatusMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_gate_rejects_without_number() {
        let machine = ShipmentStatusMachine::new();

        let result = machine.validate_transition(
            ShipmentStatus::OrderPlaced,
            ShipmentStatus::Shipped,
            false,
        );
        assert_eq!(
            result,
            TransitionResult::Rejected(RejectionReason::MissingTrackingNumber(
                ShipmentStatus::Shipped
            ))
        );

        for requested in [ShipmentStatus::ReadyForPickup, ShipmentStatus::OutForDelivery] {
            let result =
                machine.validate_transition(ShipmentStatus::Packing, requested, false);
            assert!(matches!(result, TransitionResult::Rejected(_)));
        }
    }

    #[test]
    fn test_tracking_gate_allows_with_number() {
        let machine = ShipmentStatusMachine::new();
        let result =
            machine.validate_transition(ShipmentStatus::Packing, ShipmentStatus::Shipped, true);
        assert_eq!(result, TransitionResult::Allowed);
    }

    #[test]
    fn test_ungated_statuses_never_require_tracking() {
        let machine = ShipmentStatusMachine::new();
        for requested in [
            ShipmentStatus::OrderPlaced,
            ShipmentStatus::Packing,
            ShipmentStatus::Delivered,
            ShipmentStatus::ProblemDelayed,
            ShipmentStatus::Canceled,
        ] {
            let result =
                machine.validate_transition(ShipmentStatus::OrderPlaced, requested, false);
            assert_eq!(result, TransitionResult::Allowed);
        }
    }

    #[test]
    fn test_any_status_reachable_with_tracking() {
        // Permissive by design: even "backward" moves are allowed
        let machine = ShipmentStatusMachine::new();
        let result = machine.validate_transition(
            ShipmentStatus::Delivered,
            ShipmentStatus::Packing,
            true,
        );
        assert_eq!(result, TransitionResult::Allowed);
    }

    #[test]
    fn test_rejection_message() {
        let reason = RejectionReason::MissingTrackingNumber(ShipmentStatus::OutForDelivery);
        assert_eq!(
            reason.to_string(),
            "Cannot proceed: Please add a tracking number before changing status to Out for Delivery"
        );
    }

    #[test]
    fn test_can_attach_tracking_table() {
        let machine = ShipmentStatusMachine::new();
        assert!(machine.can_attach_tracking(ShipmentStatus::Packing));
        assert!(machine.can_attach_tracking(ShipmentStatus::Shipped));
        assert!(machine.can_attach_tracking(ShipmentStatus::OutForDelivery));

        assert!(!machine.can_attach_tracking(ShipmentStatus::OrderPlaced));
        assert!(!machine.can_attach_tracking(ShipmentStatus::ReadyForPickup));
        assert!(!machine.can_attach_tracking(ShipmentStatus::Delivered));
        assert!(!machine.can_attach_tracking(ShipmentStatus::Canceled));
    }

    #[test]
    fn test_courier_state_classification() {
        let machine = ShipmentStatusMachine::new();

        let state = machine.classify_courier_state("Package delivered to recipient");
        assert!(state.is_delivered);
        assert!(!state.is_exception);

        let state = machine.classify_courier_state("delivery exception: address not found");
        assert!(!state.is_delivered);
        assert!(state.is_exception);

        // Case-sensitive by observed behavior
        let state = machine.classify_courier_state("DELIVERED");
        assert!(!state.is_delivered);

        let state = machine.classify_courier_state("in transit");
        assert!(!state.is_delivered);
        assert!(!state.is_exception);
    }
}
