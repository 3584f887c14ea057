use async_trait::async_trait;
use uuid::Uuid;

use crate::exception::WorkOrderResult;
use crate::model::entity::work_order::{WorkOrder, WorkOrderStatus};
use crate::model::vo::{NewWorkOrder, WorkOrderPatch};

#[async_trait]
pub trait WorkOrderService: Send + Sync {
    /// Snapshots catalog prices with the dealership markup, computes the
    /// estimate and persists the order as draft or submitted.
    async fn create(&self, dealership_id: Uuid, order: NewWorkOrder) -> WorkOrderResult<WorkOrder>;

    /// Merges a partial update, recomputing the estimate from the resulting
    /// state. Status changes must follow the transition table.
    async fn update(&self, id: Uuid, patch: WorkOrderPatch) -> WorkOrderResult<WorkOrder>;

    /// Trusted override that sets any status without a transition check.
    async fn force_set_status(
        &self,
        id: Uuid,
        status: WorkOrderStatus,
    ) -> WorkOrderResult<WorkOrder>;

    async fn get(&self, id: Uuid) -> WorkOrderResult<WorkOrder>;

    async fn list(&self, dealership_id: Uuid) -> WorkOrderResult<Vec<WorkOrder>>;

    async fn delete(&self, id: Uuid) -> WorkOrderResult<()>;
}
