use async_trait::async_trait;
use uuid::Uuid;

use crate::exception::WorkOrderResult;
use crate::model::entity::work_order::{WorkOrder, WorkOrderStatus};
use crate::model::vo::{
    CustomerDecision, DeliveryMethod, IssuedApproval, RequesterMeta, TokenValidation,
};

#[async_trait]
pub trait ApprovalService: Send + Sync {
    /// Issues a fresh time-limited token, moves the order to
    /// `pending_customer_approval` and records a `sent` audit entry.
    /// Calling it again replaces the previous token.
    async fn issue(
        &self,
        work_order_id: Uuid,
        method: DeliveryMethod,
    ) -> WorkOrderResult<IssuedApproval>;

    /// Looks an order up by token only and records a `viewed` audit entry
    /// when requester metadata is present.
    async fn resolve(
        &self,
        token: &str,
        viewer: Option<RequesterMeta>,
    ) -> WorkOrderResult<WorkOrder>;

    /// Probes a token without acting on it.
    async fn validate(&self, token: &str) -> WorkOrderResult<TokenValidation>;

    /// Applies the customer decision atomically. Concurrent calls on the
    /// same token produce exactly one success; the loser observes
    /// `AlreadyProcessed`.
    async fn finalize(
        &self,
        token: &str,
        decision: CustomerDecision,
        notes: Option<String>,
        meta: RequesterMeta,
    ) -> WorkOrderResult<WorkOrderStatus>;
}
