use architecture::repository::DBRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::entity::work_order::{WorkOrder, WorkOrderStatus};

/// Conditional write applied when a customer decides. The row-level filter
/// on the awaiting status is the concurrency boundary: of two simultaneous
/// submissions exactly one can match.
#[derive(Debug, Clone)]
pub struct CustomerDecisionUpdate {
    pub work_order_id: Uuid,
    pub status: WorkOrderStatus,
    pub customer_notes: Option<String>,
    pub decided_at: DateTime<Utc>,
}

#[async_trait]
pub trait WorkOrderRepo: DBRepository<WorkOrder> + Send + Sync {
    /// Token possession is the only credential of the customer-facing flow;
    /// no id-based lookup is exposed there.
    async fn find_by_approval_token(&self, token: &str) -> anyhow::Result<Option<WorkOrder>>;

    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<WorkOrder>>;

    /// Stores the token and expiry and moves the order to
    /// `pending_customer_approval` in one write.
    async fn set_approval_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<()>;

    /// Applies the decision only while the row still awaits customer action.
    /// Returns false when the guard did not match.
    async fn finalize_customer_decision(
        &self,
        update: CustomerDecisionUpdate,
    ) -> anyhow::Result<bool>;

    /// Completed orders whose last modification falls in `[from, to)`.
    async fn list_completed_between(
        &self,
        dealership_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<WorkOrder>>;
}
