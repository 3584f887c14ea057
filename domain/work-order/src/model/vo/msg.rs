use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::work_order::WorkOrderStatus;

/// Published on the status topic whenever a work order enters a notifying
/// state. Carries enough context for the dispatcher to pick recipients
/// without re-reading the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeMsg {
    pub work_order_id: Uuid,
    pub dealership_id: Uuid,
    pub technician_id: Option<Uuid>,
    pub status: WorkOrderStatus,
}
